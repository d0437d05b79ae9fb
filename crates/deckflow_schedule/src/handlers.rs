//! Keyword handlers.
//!
//! Each handler applies one SCHEDULE keyword to the snapshot of the report
//! step it appears in. Recoverable input problems go through the parse
//! context, so depending on configuration they are recorded in the error
//! guard or abort the schedule.

use deckflow_foundation::context::{SCHEDULE_INVALID_NAME, SCHEDULE_UNKNOWN_WLIST_OP};
use deckflow_foundation::{
    DeckItem, DeckKeyword, DeckRecord, Error, ErrorGuard, ParseContext, Result, unquote,
};
use deckflow_registry::{FIELD, WellSegments};
use deckflow_state::{UdqState, UdqUpdate, is_udq};
use tracing::{debug, trace};

use crate::state::ScheduleState;

/// Signature shared by all keyword handlers.
pub type KeywordHandler = fn(&mut HandlerContext<'_>) -> Result<()>;

/// Everything a handler may read or modify.
pub struct HandlerContext<'a> {
    /// Keyword being applied.
    pub keyword: &'a DeckKeyword,
    /// Snapshot of the current report step.
    pub state: &'a mut ScheduleState,
    /// UDQ values and update policies.
    pub udq_state: &'a mut UdqState,
    /// Action per diagnostic key.
    pub parse_context: &'a ParseContext,
    /// Collected diagnostics.
    pub guard: &'a mut ErrorGuard,
}

impl HandlerContext<'_> {
    /// Report step the keyword belongs to.
    #[must_use]
    pub fn step(&self) -> usize {
        self.state.step()
    }

    /// Routes a diagnostic through the parse context, located at the keyword.
    ///
    /// # Errors
    ///
    /// Fails when `key` is configured to throw.
    pub fn report(&mut self, key: &str, message: impl Into<String>) -> Result<()> {
        self.parse_context
            .handle_error(key, message, Some(self.keyword.location()), self.guard)
    }
}

/// Handler for the named keyword, if SCHEDULE handling is implemented for it.
#[must_use]
pub fn handler(name: &str) -> Option<KeywordHandler> {
    let handler: KeywordHandler = match name {
        "GRUPTREE" => handle_gruptree,
        "RPTRST" => handle_rptrst,
        "RPTSCHED" => handle_rptsched,
        "UDQ" => handle_udq,
        "WELSEGS" => handle_welsegs,
        "WELSPECS" => handle_welspecs,
        "WLIST" => handle_wlist,
        _ => return None,
    };
    Some(handler)
}

/// Applies `ctx.keyword`. Returns false if the keyword has no handler.
///
/// # Errors
///
/// Fails on malformed records or when a diagnostic is fatal.
pub fn handle_keyword(ctx: &mut HandlerContext<'_>) -> Result<bool> {
    let keyword = ctx.keyword;
    let name = keyword.name();
    let Some(handler) = handler(name) else {
        debug!(keyword = name, step = ctx.step(), "keyword not handled in SCHEDULE");
        return Ok(false);
    };
    trace!(keyword = name, step = ctx.step(), "handling keyword");
    handler(ctx)?;
    Ok(true)
}

fn string_or(record: &DeckRecord, name: &str, default: &str) -> Result<String> {
    let item = record.item(name)?;
    if item.is_empty() {
        Ok(default.to_string())
    } else {
        item.get_string(0)
    }
}

fn strings(item: &DeckItem) -> Vec<String> {
    item.values()
        .iter()
        .map(|value| unquote(value).trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

fn segment_number(item: &DeckItem) -> Result<i32> {
    let value = item.get_int(0)?;
    i32::try_from(value).map_err(|_| {
        Error::out_of_range(format!("segment number {value} in {} is too large", item.name()))
    })
}

fn handle_welspecs(ctx: &mut HandlerContext<'_>) -> Result<()> {
    let keyword = ctx.keyword;
    for record in keyword.records() {
        let well = record.item("WELL")?.get_string(0)?;
        let group = string_or(record, "GROUP", FIELD)?;
        ctx.state.define_well(&well, &group);
    }
    Ok(())
}

fn handle_gruptree(ctx: &mut HandlerContext<'_>) -> Result<()> {
    let keyword = ctx.keyword;
    for record in keyword.records() {
        let child = record.item("CHILD_GROUP")?.get_string(0)?;
        let parent = string_or(record, "PARENT_GROUP", FIELD)?;
        let groups = ctx.state.groups_mut();
        groups.add(parent);
        groups.add(child);
    }
    Ok(())
}

fn handle_welsegs(ctx: &mut HandlerContext<'_>) -> Result<()> {
    let keyword = ctx.keyword;
    let well = keyword.record(0)?.item("WELL")?.get_string(0)?;
    if ctx.state.well_catalog().get(&well).is_none() {
        return ctx.report(
            SCHEDULE_INVALID_NAME,
            format!("WELSEGS given for undefined well {well}"),
        );
    }

    // segment 1 is the top segment described by the header record
    let mut numbers = vec![1];
    for record in keyword.records().skip(1) {
        let first = segment_number(record.item("SEGMENT1")?)?;
        let last = if record.has_value("SEGMENT2") {
            segment_number(record.item("SEGMENT2")?)?
        } else {
            first
        };
        for number in first..=last {
            if !numbers.contains(&number) {
                numbers.push(number);
            }
        }
    }
    let segments = WellSegments::new(numbers)?;
    trace!(well = %well, segments = segments.len(), "WELSEGS applied");
    ctx.state.well_catalog_mut().set_segments(&well, segments)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WListAction {
    New,
    Add,
    Mov,
    Del,
}

impl WListAction {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "NEW" => Some(Self::New),
            "ADD" => Some(Self::Add),
            "MOV" => Some(Self::Mov),
            "DEL" => Some(Self::Del),
            _ => None,
        }
    }
}

fn handle_wlist(ctx: &mut HandlerContext<'_>) -> Result<()> {
    let keyword = ctx.keyword;
    for record in keyword.records() {
        let name = record.item("NAME")?.get_string(0)?;
        let action_name = record.item("ACTION")?.get_string(0)?;
        let Some(action) = WListAction::parse(action_name.trim()) else {
            ctx.report(
                SCHEDULE_UNKNOWN_WLIST_OP,
                format!("unknown WLIST operation {action_name} for {name}"),
            )?;
            continue;
        };
        if !name.starts_with('*') || name.len() < 2 {
            ctx.report(
                SCHEDULE_INVALID_NAME,
                format!("well list name {name} must start with '*'"),
            )?;
            continue;
        }

        let mut wells: Vec<String> = Vec::new();
        for arg in strings(record.item("WELLS")?) {
            let names = ctx.state.well_matcher().wells(&arg);
            if names.is_empty() && !arg.contains('*') {
                ctx.report(
                    SCHEDULE_INVALID_NAME,
                    format!("WLIST {name} refers to undefined well {arg}"),
                )?;
                continue;
            }
            for well in names {
                if !wells.contains(&well) {
                    wells.push(well);
                }
            }
        }

        let wlists = ctx.state.wlists_mut();
        if action == WListAction::New {
            wlists.new_list(&name, &wells)?;
            continue;
        }
        if !wlists.has_list(&name) {
            ctx.report(
                SCHEDULE_INVALID_NAME,
                format!("WLIST {action_name} for undefined well list {name}"),
            )?;
            continue;
        }
        let wlists = ctx.state.wlists_mut();
        match action {
            WListAction::Del => {
                for well in &wells {
                    wlists.del_list_well(well, &name);
                }
            }
            WListAction::Mov => {
                for well in &wells {
                    wlists.del_well(well);
                }
                wlists.add_or_create(&name, &wells)?;
            }
            WListAction::Add | WListAction::New => wlists.add_or_create(&name, &wells)?,
        }
    }
    Ok(())
}

fn handle_rptsched(ctx: &mut HandlerContext<'_>) -> Result<()> {
    let rpt = deckflow_report::RptConfig::from_keyword(
        ctx.keyword,
        Some(ctx.state.rpt_config()),
        ctx.parse_context,
        ctx.guard,
    )?;
    ctx.state.set_rpt_config(rpt);
    ctx.state
        .rst_config_mut()
        .update(ctx.keyword, ctx.parse_context, ctx.guard)
}

fn handle_rptrst(ctx: &mut HandlerContext<'_>) -> Result<()> {
    ctx.state
        .rst_config_mut()
        .update(ctx.keyword, ctx.parse_context, ctx.guard)
}

fn handle_udq(ctx: &mut HandlerContext<'_>) -> Result<()> {
    let step = ctx.step();
    let keyword = ctx.keyword;
    for record in keyword.records() {
        let action = record.item("ACTION")?.get_string(0)?;
        if action.trim() != "UPDATE" {
            trace!(action = %action, "UDQ record not handled");
            continue;
        }
        let quantity = record.item("QUANTITY")?.get_string(0)?;
        if !is_udq(&quantity) {
            return Err(Error::not_udq(quantity));
        }
        let data = record.item("DATA")?;
        let status = if data.is_empty() {
            UdqUpdate::On
        } else {
            UdqUpdate::parse(data.get_string(0)?.trim())?
        };
        ctx.udq_state.set_update(&quantity, status, step);
    }
    Ok(())
}
