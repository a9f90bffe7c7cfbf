use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use sqlx::mysql::MySqlPoolOptions;

use taskboard_backend::routes;
use taskboard_backend::state::AppState;
use taskboard_backend::store::fs_assets::FsAssetStore;
use taskboard_backend::store::mysql::{MySqlTaskStore, MySqlTokenStore, MySqlUserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to create pool");

    let base_url = env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "storage".to_string());
    let server_address = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let state = AppState {
        tasks: Arc::new(MySqlTaskStore::new(pool.clone())),
        users: Arc::new(MySqlUserStore::new(pool.clone())),
        tokens: Arc::new(MySqlTokenStore::new(pool)),
        assets: Arc::new(FsAssetStore::new(storage_dir, &base_url)),
    };

    println!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .route(
                "/",
                web::get().to(|| async { HttpResponse::Ok().body("Taskboard API") }),
            )
            .configure(routes::routes::auth_configure)
            .configure(routes::routes::tasks_configure)
    })
    .bind(server_address)?
    .run()
    .await
}
