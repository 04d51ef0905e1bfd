//! Startup walkthrough exercising every user service operation.
//!
//! Each step logs its outcome. Expected failures (duplicate email, missing
//! user) are checked by kind; anything else aborts the walkthrough.

use roster_core::{RosterError, RosterResult, UserId};
use roster_service::{CreateUserRequest, UpdateUserRequest, UserService};
use tracing::info;

/// Runs the walkthrough against the given service.
pub async fn run(service: &dyn UserService) -> RosterResult<()> {
    let created = service
        .create_user(CreateUserRequest::new("alice", "alice@example.com", "s3cret"))
        .await?;
    info!(id = %created.id, username = %created.username, "Created user");

    expect_error(
        "duplicate create",
        service
            .create_user(CreateUserRequest::new("alice2", "Alice@Example.com", "other"))
            .await,
        |e| matches!(e, RosterError::DuplicateEmail(_)),
    )?;

    let first = service.get_user_by_id(created.id).await?;
    info!(id = %first.id, "Fetched user (store)");
    let second = service.get_user_by_id(created.id).await?;
    info!(id = %second.id, "Fetched user (cache)");

    let updated = service
        .update_user(
            created.id,
            UpdateUserRequest::new("alice.smith", "alice.smith@example.com"),
        )
        .await?;
    info!(id = %updated.id, email = %updated.email, "Updated user");

    let refreshed = service.get_user_by_id(created.id).await?;
    if refreshed.email != updated.email {
        return Err(RosterError::internal(format!(
            "Read after update returned stale email {}",
            refreshed.email
        )));
    }
    info!(id = %refreshed.id, email = %refreshed.email, "Fetched user after update");

    expect_error(
        "get nonexistent",
        service.get_user_by_id(UserId::new()).await,
        RosterError::is_not_found,
    )?;

    service.delete_user(created.id).await?;
    info!(id = %created.id, "Deleted user");

    expect_error(
        "get after delete",
        service.get_user_by_id(created.id).await,
        RosterError::is_not_found,
    )?;

    info!("Walkthrough finished");
    Ok(())
}

fn expect_error<T>(
    step: &str,
    result: RosterResult<T>,
    expected: impl Fn(&RosterError) -> bool,
) -> RosterResult<()> {
    match result {
        Err(e) if expected(&e) => {
            info!(step, error_code = e.error_code(), "Rejected as expected: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
        Ok(_) => Err(RosterError::internal(format!("Step '{}' unexpectedly succeeded", step))),
    }
}
