//! Route table shared by validation, route registration and API docs.
//!
//! Paths are declared once as `:param` templates. The server renders them in
//! actix's `{param}` syntax; clients fill them with [`build_url`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::attendance::InsertAttendance;
use crate::model::employee::InsertEmployee;
use crate::validation::{Insertable, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    /// An actix route guarded by this method.
    pub fn route(self) -> actix_web::Route {
        match self {
            HttpMethod::Get => actix_web::web::get(),
            HttpMethod::Post => actix_web::web::post(),
            HttpMethod::Delete => actix_web::web::delete(),
        }
    }
}

/// One declared operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContract {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    /// Name of the input schema, for operations that take a body.
    pub input: Option<&'static str>,
    pub responses: &'static [u16],
}

impl RouteContract {
    /// The path template with `:name` segments rewritten to `{name}`.
    pub fn actix_path(&self) -> String {
        self.path
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => format!("{{{}}}", name),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// A create operation bound to the insertable shape it validates.
#[derive(Debug)]
pub struct CreateContract<I> {
    pub route: RouteContract,
    input: PhantomData<fn() -> I>,
}

impl<I> Clone for CreateContract<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for CreateContract<I> {}

impl<I: Insertable> CreateContract<I> {
    fn new(name: &'static str, path: &'static str) -> Self {
        Self {
            route: RouteContract {
                name,
                method: HttpMethod::Post,
                path,
                input: Some(I::SCHEMA),
                responses: &[201, 400, 500],
            },
            input: PhantomData,
        }
    }

    pub fn parse(&self, raw: &Value) -> Result<I, ValidationErrors> {
        I::validate(raw)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmployeeRoutes {
    pub list: RouteContract,
    pub create: CreateContract<InsertEmployee>,
    pub get: RouteContract,
    pub delete: RouteContract,
}

#[derive(Debug, Clone, Copy)]
pub struct AttendanceRoutes {
    pub list: RouteContract,
    pub create: CreateContract<InsertAttendance>,
}

/// Immutable registry of every operation the server exposes.
#[derive(Debug, Clone, Copy)]
pub struct ApiContract {
    pub employees: EmployeeRoutes,
    pub attendance: AttendanceRoutes,
}

impl ApiContract {
    pub fn new() -> Self {
        Self {
            employees: EmployeeRoutes {
                list: RouteContract {
                    name: "employees.list",
                    method: HttpMethod::Get,
                    path: "/api/employees",
                    input: None,
                    responses: &[200, 500],
                },
                create: CreateContract::new("employees.create", "/api/employees"),
                get: RouteContract {
                    name: "employees.get",
                    method: HttpMethod::Get,
                    path: "/api/employees/:id",
                    input: None,
                    responses: &[200, 404, 500],
                },
                delete: RouteContract {
                    name: "employees.delete",
                    method: HttpMethod::Delete,
                    path: "/api/employees/:id",
                    input: None,
                    responses: &[200, 404, 500],
                },
            },
            attendance: AttendanceRoutes {
                list: RouteContract {
                    name: "attendance.list",
                    method: HttpMethod::Get,
                    path: "/api/attendance",
                    input: None,
                    responses: &[200, 500],
                },
                create: CreateContract::new("attendance.create", "/api/attendance"),
            },
        }
    }

    /// All routes in declaration order.
    pub fn routes(&self) -> Vec<RouteContract> {
        vec![
            self.employees.list,
            self.employees.create.route,
            self.employees.get,
            self.employees.delete,
            self.attendance.list,
            self.attendance.create.route,
        ]
    }
}

impl Default for ApiContract {
    fn default() -> Self {
        Self::new()
    }
}

/// Substitutes `:name` segments of `path` with the matching parameter.
///
/// Placeholders without a parameter are left as they are. Values are inserted
/// verbatim.
pub fn build_url<I, K, V>(path: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: fmt::Display,
{
    let params: Vec<(K, V)> = params.into_iter().collect();
    path.split('/')
        .map(|segment| {
            segment
                .strip_prefix(':')
                .and_then(|name| params.iter().find(|(k, _)| k.as_ref() == name))
                .map(|(_, v)| v.to_string())
                .unwrap_or_else(|| segment.to_string())
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// 400 body: the first violation of a rejected payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    #[schema(example = "Required")]
    pub message: String,
    #[schema(example = "email")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&ValidationErrors> for ValidationErrorBody {
    fn from(errors: &ValidationErrors) -> Self {
        let first = errors.first();
        Self {
            message: first.message.clone(),
            field: Some(first.field()),
        }
    }
}

/// 404 and 500 body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Employee not found")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessBody {
    #[schema(example = true)]
    pub success: bool,
}
