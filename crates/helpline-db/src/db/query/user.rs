//! Statements for the caller directory.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::app_user;
use crate::error::DbResult;
use crate::model::user::{NewUser, OwnerProfile, User};

/// ## Summary
/// Inserts the caller, or refreshes name and email if the id is known.
///
/// ## Errors
/// Returns an error if the statement fails.
pub async fn upsert(conn: &mut AsyncPgConnection, new_user: &NewUser<'_>) -> DbResult<User> {
    Ok(diesel::insert_into(app_user::table)
        .values(new_user)
        .on_conflict(app_user::id)
        .do_update()
        .set((
            app_user::name.eq(new_user.name),
            app_user::email.eq(new_user.email),
            app_user::updated_at.eq(chrono::Utc::now()),
        ))
        .returning(User::as_returning())
        .get_result(conn)
        .await?)
}

/// ## Summary
/// Finds the most recently seen caller with the given email.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_email(conn: &mut AsyncPgConnection, email: &str) -> DbResult<Option<User>> {
    Ok(app_user::table
        .filter(app_user::email.eq(email))
        .order(app_user::updated_at.desc())
        .select(User::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Loads the name/email projection for a ticket owner.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn owner_profile(
    conn: &mut AsyncPgConnection,
    id: uuid::Uuid,
) -> DbResult<Option<OwnerProfile>> {
    Ok(app_user::table
        .find(id)
        .select(OwnerProfile::as_select())
        .first(conn)
        .await
        .optional()?)
}
