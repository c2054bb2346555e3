//! Route Table
//!
//! Maps browser paths to views and back. Delete routes accept a comma-separated
//! id list so a multi-row selection can be removed in one confirmation.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Root,
    Tasks,
    UserTasks { user_id: u32 },
    TaskNew { user_id: u32 },
    TaskEdit { id: u32 },
    TaskDelete { ids: Vec<u32> },
    Users,
    UserNew,
    UserEdit { id: u32 },
    UserDelete { ids: Vec<u32> },
    ExpiredTasksReport,
    NotFound,
}

/// What the shell should do with a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["tasks"] => Route::Tasks,
            ["tasks", user_id] => parse_id(user_id).map_or(Route::NotFound, |user_id| Route::UserTasks { user_id }),
            ["tasks", user_id, "new"] => parse_id(user_id).map_or(Route::NotFound, |user_id| Route::TaskNew { user_id }),
            ["tasks", id, "edit"] => parse_id(id).map_or(Route::NotFound, |id| Route::TaskEdit { id }),
            ["tasks", ids, "delete"] => parse_ids(ids).map_or(Route::NotFound, |ids| Route::TaskDelete { ids }),
            ["users"] => Route::Users,
            ["users", "new"] => Route::UserNew,
            ["users", id, "edit"] => parse_id(id).map_or(Route::NotFound, |id| Route::UserEdit { id }),
            ["users", ids, "delete"] => parse_ids(ids).map_or(Route::NotFound, |ids| Route::UserDelete { ids }),
            ["reports", "expired-tasks"] => Route::ExpiredTasksReport,
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Root => "/".to_string(),
            Route::Tasks => "/tasks".to_string(),
            Route::UserTasks { user_id } => format!("/tasks/{}", user_id),
            Route::TaskNew { user_id } => format!("/tasks/{}/new", user_id),
            Route::TaskEdit { id } => format!("/tasks/{}/edit", id),
            Route::TaskDelete { ids } => format!("/tasks/{}/delete", join_ids(ids)),
            Route::Users => "/users".to_string(),
            Route::UserNew => "/users/new".to_string(),
            Route::UserEdit { id } => format!("/users/{}/edit", id),
            Route::UserDelete { ids } => format!("/users/{}/delete", join_ids(ids)),
            Route::ExpiredTasksReport => "/reports/expired-tasks".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Routes reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }

    pub fn is_tasks_section(&self) -> bool {
        matches!(
            self,
            Route::Tasks | Route::UserTasks { .. } | Route::TaskNew { .. } | Route::TaskEdit { .. } | Route::TaskDelete { .. }
        )
    }

    pub fn is_users_section(&self) -> bool {
        matches!(self, Route::Users | Route::UserNew | Route::UserEdit { .. } | Route::UserDelete { .. })
    }

    /// Apply the auth guard and the `/` alias.
    pub fn resolve(self, authenticated: bool) -> Resolution {
        match (self, authenticated) {
            (Route::Login, true) => Resolution::Redirect(Route::Tasks),
            (Route::Login, false) => Resolution::Render(Route::Login),
            (_, false) => Resolution::Redirect(Route::Login),
            (Route::Root, true) => Resolution::Redirect(Route::Tasks),
            (route, true) => Resolution::Render(route),
        }
    }
}

fn parse_id(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok()
}

fn parse_ids(raw: &str) -> Option<Vec<u32>> {
    let ids = raw.split(',').map(parse_id).collect::<Option<Vec<u32>>>()?;
    (!ids.is_empty()).then_some(ids)
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
}

/// Path plus an optional query (without `?`)
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::from_path("/"), Route::Root);
        assert_eq!(Route::from_path("/tasks"), Route::Tasks);
        assert_eq!(Route::from_path("/tasks/"), Route::Tasks);
        assert_eq!(Route::from_path("/tasks/3"), Route::UserTasks { user_id: 3 });
        assert_eq!(Route::from_path("/tasks/3/new"), Route::TaskNew { user_id: 3 });
        assert_eq!(Route::from_path("/tasks/12/edit?pageNumber=2"), Route::TaskEdit { id: 12 });
        assert_eq!(Route::from_path("/tasks/4,5/delete"), Route::TaskDelete { ids: vec![4, 5] });
        assert_eq!(Route::from_path("/users/new"), Route::UserNew);
        assert_eq!(Route::from_path("/users/9/edit"), Route::UserEdit { id: 9 });
        assert_eq!(Route::from_path("/users/9/delete"), Route::UserDelete { ids: vec![9] });
        assert_eq!(Route::from_path("/reports/expired-tasks"), Route::ExpiredTasksReport);
        assert_eq!(Route::from_path("/tasks/abc"), Route::NotFound);
        assert_eq!(Route::from_path("/users/1,,2/delete"), Route::NotFound);
        assert_eq!(Route::from_path("/nowhere"), Route::NotFound);
    }

    #[test]
    fn test_paths_round_trip() {
        let routes = [
            Route::Login,
            Route::Tasks,
            Route::UserTasks { user_id: 2 },
            Route::TaskNew { user_id: 2 },
            Route::TaskEdit { id: 7 },
            Route::TaskDelete { ids: vec![7, 8] },
            Route::Users,
            Route::UserNew,
            Route::UserEdit { id: 1 },
            Route::UserDelete { ids: vec![1] },
            Route::ExpiredTasksReport,
        ];
        for route in routes {
            assert_eq!(Route::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_delete_paths() {
        assert_eq!(Route::TaskDelete { ids: vec![4, 5] }.to_path(), "/tasks/4,5/delete");
        assert_eq!(Route::UserDelete { ids: vec![9] }.to_path(), "/users/9/delete");
    }

    #[test]
    fn test_auth_guard() {
        assert_eq!(Route::Users.resolve(false), Resolution::Redirect(Route::Login));
        assert_eq!(Route::Login.resolve(true), Resolution::Redirect(Route::Tasks));
        assert_eq!(Route::Login.resolve(false), Resolution::Render(Route::Login));
        assert_eq!(Route::Root.resolve(true), Resolution::Redirect(Route::Tasks));
        assert_eq!(Route::TaskEdit { id: 1 }.resolve(true), Resolution::Render(Route::TaskEdit { id: 1 }));
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/users", ""), "/users");
        assert_eq!(with_query("/users", "pageNumber=2"), "/users?pageNumber=2");
    }
}
