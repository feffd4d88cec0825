use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ProductStore;

pub fn run<S: ProductStore>(store: &S) -> Result<CmdResult> {
    let health = store.health()?;

    let mut result = CmdResult::default();
    let line = if health.service.is_empty() {
        health.status.clone()
    } else {
        format!("{}: {}", health.service, health.status)
    };
    if health.status == "healthy" {
        result.add_message(CmdMessage::success(line));
    } else {
        result.add_message(CmdMessage::warning(line));
    }
    Ok(result.with_health(health))
}
