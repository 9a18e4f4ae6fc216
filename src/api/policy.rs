//! Route authorization: one capability table consulted by one guard,
//! instead of per-handler role literals.

use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::api::flash;

/// Session keys set at login and cleared at logout.
pub mod keys {
    pub const LOGGED_IN: &str = "loggedin";
    pub const USER_ID: &str = "id";
    pub const USERNAME: &str = "username";
    pub const ROLE: &str = "role";
}

/// The closed set of roles the capability table knows about. Anything else
/// stays authenticated but only ever sees the minimal dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Manager,
    Zookeeper,
    Veterinarian,
    Other(String),
}

impl Role {
    pub fn parse(raw: &str) -> Role {
        match raw {
            "Manager" => Role::Manager,
            "Zookeeper" => Role::Zookeeper,
            "Veterinarian" => Role::Veterinarian,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Manager => "Manager",
            Role::Zookeeper => "Zookeeper",
            Role::Veterinarian => "Veterinarian",
            Role::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Animals,
    AddAnimal,
    DeleteAnimal,
    Habitats,
    DeleteHabitat,
    Visitors,
    VisitorsUnvisited,
    EditVisitor,
    Veterinary,
    AddVetRecord,
}

const MANAGER_ONLY: &[Role] = &[Role::Manager];
const ANIMAL_KEEPERS: &[Role] = &[Role::Manager, Role::Zookeeper];
const MEDICAL_STAFF: &[Role] = &[Role::Manager, Role::Zookeeper, Role::Veterinarian];
/// Empty slice means any authenticated employee.
const ANY_EMPLOYEE: &[Role] = &[];

pub fn allowed_roles(route: Route) -> &'static [Role] {
    match route {
        Route::Dashboard => ANY_EMPLOYEE,
        Route::Animals | Route::AddAnimal | Route::DeleteAnimal => ANIMAL_KEEPERS,
        Route::Habitats
        | Route::DeleteHabitat
        | Route::Visitors
        | Route::VisitorsUnvisited
        | Route::EditVisitor => MANAGER_ONLY,
        Route::Veterinary | Route::AddVetRecord => MEDICAL_STAFF,
    }
}

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

/// Authenticates and authorizes in one step. Not logged in redirects to
/// the login page; logged in with the wrong role flashes a denial and
/// redirects to the dashboard.
pub async fn require(session: &Session, route: Route) -> Result<CurrentUser, Response> {
    let logged_in = session
        .get::<bool>(keys::LOGGED_IN)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);
    if !logged_in {
        return Err(Redirect::to("/login").into_response());
    }

    let id = session.get::<i32>(keys::USER_ID).await.ok().flatten();
    let username = session.get::<String>(keys::USERNAME).await.ok().flatten();
    let role = session.get::<String>(keys::ROLE).await.ok().flatten();
    let (Some(id), Some(username), Some(role)) = (id, username, role) else {
        return Err(Redirect::to("/login").into_response());
    };

    let role = Role::parse(&role);
    let allowed = allowed_roles(route);
    if !allowed.is_empty() && !allowed.contains(&role) {
        flash::danger(session, "You do not have permission to access this page.").await;
        return Err(Redirect::to("/dashboard").into_response());
    }

    Ok(CurrentUser { id, username, role })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animal_routes_admit_managers_and_zookeepers_only() {
        for route in [Route::Animals, Route::AddAnimal, Route::DeleteAnimal] {
            let allowed = allowed_roles(route);
            assert!(allowed.contains(&Role::Manager));
            assert!(allowed.contains(&Role::Zookeeper));
            assert!(!allowed.contains(&Role::Veterinarian));
            assert_eq!(allowed.len(), 2);
        }
    }

    #[test]
    fn visitor_and_habitat_routes_are_manager_only() {
        for route in [
            Route::Habitats,
            Route::DeleteHabitat,
            Route::Visitors,
            Route::VisitorsUnvisited,
            Route::EditVisitor,
        ] {
            assert_eq!(allowed_roles(route), &[Role::Manager]);
        }
    }

    #[test]
    fn veterinary_routes_admit_all_three_staff_roles() {
        for route in [Route::Veterinary, Route::AddVetRecord] {
            let allowed = allowed_roles(route);
            assert_eq!(allowed.len(), 3);
            assert!(allowed.contains(&Role::Manager));
            assert!(allowed.contains(&Role::Zookeeper));
            assert!(allowed.contains(&Role::Veterinarian));
        }
    }

    #[test]
    fn dashboard_admits_any_authenticated_role() {
        assert!(allowed_roles(Route::Dashboard).is_empty());
    }

    #[test]
    fn unknown_roles_round_trip_through_other() {
        assert_eq!(Role::parse("Manager"), Role::Manager);
        let intern = Role::parse("Intern");
        assert_eq!(intern, Role::Other("Intern".to_string()));
        assert_eq!(intern.as_str(), "Intern");
        assert!(!allowed_roles(Route::Animals).contains(&intern));
    }
}
