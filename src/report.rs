//! 분석 결과를 사람이 읽는 텍스트 보고서로 만든다. 값은 코어가 계산한 필드만 사용한다.

use std::fmt::Write;

use crate::config::DefaultUnits;
use crate::hydraulics::{AnalysisResult, Recommendation};
use crate::i18n::{keys, Translator};
use crate::input::SystemInputs;
use crate::presets::{BoilerCatalog, BoilerSelection};
use crate::units::{convert_flow, convert_head, FlowUnit, HeadUnit};

/// 보고서 머리말에 쓰는 보일러 정보.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub catalog: &'a BoilerCatalog,
    pub selection: Option<&'a BoilerSelection>,
    pub units: DefaultUnits,
}

/// 유한하지 않은 값은 "-"로 표시한다.
pub fn format_num(v: f64, digits: usize) -> String {
    if v.is_finite() {
        format!("{v:.digits$}")
    } else {
        "-".to_string()
    }
}

fn head(v_m: f64, unit: HeadUnit) -> String {
    format!(
        "{} {}",
        format_num(convert_head(v_m, HeadUnit::Meter, unit), 2),
        unit.symbol()
    )
}

fn flow(v: f64, unit: FlowUnit) -> String {
    format!(
        "{} {}",
        format_num(convert_flow(v, FlowUnit::CubicMeterPerHour, unit), 2),
        unit.symbol()
    )
}

fn status<'a>(tr: &'a Translator, ok: bool) -> &'a str {
    tr.t(if ok { keys::STATUS_OK } else { keys::STATUS_NOT_OK })
}

/// 현지화된 권고 문구.
pub fn recommendation_text<'a>(tr: &'a Translator, rec: Recommendation) -> &'a str {
    match rec {
        Recommendation::BuiltInPumpSufficient => tr.t(keys::RECOMMENDATION_SUFFICIENT),
        Recommendation::SeparatorRequired => tr.t(keys::RECOMMENDATION_SEPARATOR),
    }
}

/// 전체 보고서를 만든다.
pub fn render_report(
    result: &AnalysisResult,
    inputs: &SystemInputs,
    ctx: &ReportContext<'_>,
    tr: &Translator,
) -> String {
    let mut out = String::new();
    write_report(&mut out, result, inputs, ctx, tr).ok();
    out
}

fn write_report(
    out: &mut String,
    result: &AnalysisResult,
    inputs: &SystemInputs,
    ctx: &ReportContext<'_>,
    tr: &Translator,
) -> std::fmt::Result {
    let hu = ctx.units.head;
    let fu = ctx.units.flow;
    let f = &result.flows;
    let boiler = &inputs.boiler;

    if let Some(sel) = ctx.selection {
        let title = ctx
            .catalog
            .find(&sel.archetype)
            .map(|b| b.title.as_str())
            .unwrap_or(sel.archetype.as_str());
        // 모르는 단 라벨은 카탈로그가 대체한 단으로 표시한다
        let speed = ctx
            .catalog
            .select(&sel.archetype, &sel.speed)
            .map(|s| s.label)
            .unwrap_or_else(|| sel.speed.clone());
        writeln!(
            out,
            "{} {}, {} {}",
            tr.t(keys::REPORT_BOILER),
            title,
            tr.t(keys::REPORT_SPEED),
            speed
        )?;
    }
    writeln!(
        out,
        "{} H0 = {}; Gmax = {}",
        tr.t(keys::REPORT_PUMP),
        head(boiler.pump_h0_m, hu),
        flow(boiler.pump_gmax_m3_per_h, fu)
    )?;
    writeln!(
        out,
        "{} H_int@{} ≈ {}",
        tr.t(keys::REPORT_INTERNAL),
        flow(boiler.internal_ref_flow_m3_per_h, fu),
        head(boiler.internal_ref_head_m, hu)
    )?;

    writeln!(out, "\n{}", tr.t(keys::REPORT_FLOWS_HEADING))?;
    writeln!(
        out,
        "  {} {}; {} {}",
        tr.t(keys::REPORT_RADIATOR_FLOW),
        flow(f.radiator_flow_m3_per_h, fu),
        tr.t(keys::REPORT_UFH_LOOP_FLOW),
        flow(f.ufh_loop_flow_m3_per_h, fu)
    )?;
    writeln!(
        out,
        "  {} {}; {} {}",
        tr.t(keys::REPORT_MIX_FRACTION),
        format_num(f.mix_fraction, 2),
        tr.t(keys::REPORT_UFH_PRIMARY_FLOW),
        flow(f.ufh_primary_flow_m3_per_h, fu)
    )?;
    writeln!(out, "  {} {}", tr.t(keys::REPORT_TOTAL_FLOW), flow(f.total_flow_m3_per_h, fu))?;
    if !f.mixing_valid && f.ufh_loop_flow_m3_per_h > 0.0 {
        writeln!(out, "  {}", tr.t(keys::REPORT_MIXING_INVALID))?;
    }
    if result.ufh_valve_head_loss_m > 0.0 {
        writeln!(
            out,
            "  {} {} (Kvs = {})",
            tr.t(keys::REPORT_VALVE_LOSS),
            head(result.ufh_valve_head_loss_m, hu),
            format_num(inputs.ufh.valve_kvs, 2)
        )?;
    }

    writeln!(out, "\n{}", tr.t(keys::REPORT_NO_EXTRA_PUMP))?;
    writeln!(out, "  {} {}", tr.t(keys::REPORT_CAPACITY), flow(result.capacity_flow_m3_per_h, fu))?;
    let limited = if result.capacity_limited {
        format!(" {}", tr.t(keys::REPORT_CAPACITY_LIMITED))
    } else {
        String::new()
    };
    writeln!(
        out,
        "  {} {}{}",
        tr.t(keys::REPORT_DELIVERED),
        flow(result.delivered_flow_m3_per_h, fu),
        limited
    )?;
    writeln!(out, "  {} {}", tr.t(keys::REPORT_RESIDUAL), head(result.residual_head_m, hu))?;
    writeln!(out, "  {} {}", tr.t(keys::REPORT_EXTERNAL), head(result.external_head_required_m, hu))?;
    writeln!(
        out,
        "  {} {} % → {}",
        tr.t(keys::REPORT_MARGIN),
        format_num((result.margin - 1.0) * 100.0, 0),
        head(result.external_head_with_margin_m(), hu)
    )?;
    writeln!(out, "  {} {}", tr.t(keys::REPORT_CHECK), status(tr, result.feasible))?;
    writeln!(
        out,
        "  {} {} / {} {}",
        tr.t(keys::REPORT_BRANCH_RADIATOR),
        status(tr, result.radiator_head_ok),
        tr.t(keys::REPORT_BRANCH_UFH),
        status(tr, result.ufh_head_ok)
    )?;
    writeln!(
        out,
        "  {} {} °C",
        tr.t(keys::REPORT_RETURN_TEMP),
        format_num(result.boiler_return_temp_c, 1)
    )?;

    let sep = if result.feasible {
        keys::REPORT_SEPARATOR_NOT_NEEDED
    } else {
        keys::REPORT_SEPARATOR_NEEDED
    };
    writeln!(out, "\n{} {}", tr.t(keys::REPORT_SEPARATOR), tr.t(sep))?;
    writeln!(out, "\n{}", tr.t(keys::REPORT_CONCLUSION))?;
    writeln!(out, "  {}", recommendation_text(tr, result.recommendation))?;
    writeln!(out, "  {}", tr.t(keys::REPORT_MULTI_PUMP_NOTE))?;
    Ok(())
}
