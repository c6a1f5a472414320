use crate::{
    api::{attendance, employee},
    contract::{ApiContract, MessageBody, RouteContract},
};
use actix_web::{HttpResponse, Route, error::InternalError, web};
use tracing::debug;

/// Registers the contract and every route it declares.
pub fn configure(cfg: &mut web::ServiceConfig, contract: &ApiContract) {
    let employee_routes = &contract.employees;
    let attendance_routes = &contract.attendance;

    let bindings: Vec<(RouteContract, Route)> = vec![
        (
            employee_routes.list,
            employee_routes.list.method.route().to(employee::list_employees),
        ),
        (
            employee_routes.create.route,
            employee_routes.create.route.method.route().to(employee::create_employee),
        ),
        (
            employee_routes.get,
            employee_routes.get.method.route().to(employee::get_employee),
        ),
        (
            employee_routes.delete,
            employee_routes.delete.method.route().to(employee::delete_employee),
        ),
        (
            attendance_routes.list,
            attendance_routes.list.method.route().to(attendance::list_attendance),
        ),
        (
            attendance_routes.create.route,
            attendance_routes.create.route.method.route().to(attendance::create_attendance),
        ),
    ];

    // one resource per path, so an unmatched method answers 405
    let mut resources: Vec<(String, Vec<Route>)> = Vec::new();
    for (route, handler) in bindings {
        debug!(
            name = route.name,
            method = %route.method,
            path = route.path,
            input = route.input.unwrap_or("-"),
            responses = ?route.responses,
            "Registering route"
        );
        let path = route.actix_path();
        match resources.iter().position(|(p, _)| *p == path) {
            Some(i) => resources[i].1.push(handler),
            None => resources.push((path, vec![handler])),
        }
    }

    cfg.app_data(web::Data::new(*contract))
        .app_data(json_config());
    for (path, routes) in resources {
        let resource = routes
            .into_iter()
            .fold(web::resource(path), |resource, route| resource.route(route));
        cfg.service(resource);
    }
}

/// Unparseable JSON bodies answer 400 with the parser's message.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(MessageBody {
            message: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}
