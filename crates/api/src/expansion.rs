//! Protocol-to-scheduled-task expansion shared by the workflow handlers.
//!
//! Recording a breeding, farrowing, or weaning must materialize every task
//! of every active protocol anchored to that trigger. The expansion runs
//! as ordered inserts after the primary writes; a failure stops the chain
//! and surfaces the error, leaving earlier inserts committed.

use chrono::NaiveDate;
use farrowtrack_core::protocol::{due_date, TriggerEvent};
use farrowtrack_core::types::DbId;
use farrowtrack_db::repositories::{ProtocolRepo, ScheduledTaskRepo};
use farrowtrack_db::DbPool;

/// Expand all active protocols for `trigger` into scheduled tasks anchored
/// at `trigger_date`, bound to `sow_id` when the trigger concerns one sow.
///
/// Returns the number of scheduled tasks created.
pub async fn expand_active_protocols(
    pool: &DbPool,
    organization_id: DbId,
    trigger: TriggerEvent,
    trigger_date: NaiveDate,
    sow_id: Option<DbId>,
) -> Result<usize, sqlx::Error> {
    let protocols =
        ProtocolRepo::list_active_by_trigger(pool, organization_id, trigger.as_str()).await?;

    let mut created = 0;
    for protocol in &protocols {
        let templates = ProtocolRepo::list_tasks(pool, protocol.id).await?;
        for template in &templates {
            ScheduledTaskRepo::create_from_protocol(
                pool,
                organization_id,
                template.id,
                sow_id,
                &template.title,
                template.description.as_deref(),
                due_date(trigger_date, template.days_offset),
            )
            .await?;
            created += 1;
        }
    }

    if created > 0 {
        tracing::info!(
            organization_id,
            trigger = trigger.as_str(),
            %trigger_date,
            created,
            "Expanded protocols into scheduled tasks"
        );
    }

    Ok(created)
}
