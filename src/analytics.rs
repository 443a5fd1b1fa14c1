//! Product analytics, emitted as structured `tracing` events on the
//! `analytics` target so any subscriber can forward them.

use tracing::info;

use crate::leads::LeadKind;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LeadGenStatus {
    Start,
    Success,
    Fail,
}

impl LeadGenStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadGenStatus::Start => "start",
            LeadGenStatus::Success => "success",
            LeadGenStatus::Fail => "fail",
        }
    }
}

pub fn track_event(name: &str, params: &[(&str, &str)]) {
    let params = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",");
    info!(target: "analytics", event = name, params = %params, "track");
}

pub fn track_view(page: &str) {
    track_event("page_view", &[("page", page)]);
}

pub fn track_lead_gen(kind: LeadKind, status: LeadGenStatus) {
    track_event(
        "lead_generation",
        &[("type", kind.as_str()), ("status", status.as_str())],
    );
}
