use actix_web::web;

use super::auth::auth_handlers;
use super::tasks::tasks_handlers;

pub fn auth_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(auth_handlers::register))
        .route("/login", web::post().to(auth_handlers::login))
        .route("/logout", web::post().to(auth_handlers::logout));
}

pub fn tasks_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/tasks")
            .route(web::get().to(tasks_handlers::list_tasks))
            .route(web::post().to(tasks_handlers::create_task)),
    )
    .service(
        web::resource("/tasks/{id}")
            .route(web::get().to(tasks_handlers::get_task))
            .route(web::put().to(tasks_handlers::update_task))
            .route(web::delete().to(tasks_handlers::delete_task)),
    )
    .service(
        web::resource("/tasks/{id}/complete").route(web::put().to(tasks_handlers::complete_task)),
    )
    .service(web::resource("/public/tasks").route(web::get().to(tasks_handlers::public_tasks)));
}
