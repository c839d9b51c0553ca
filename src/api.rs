use rocket::Route;

mod candidates;
mod common;
mod elections;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(elections::routes());
    routes.extend(candidates::routes());
    routes
}
