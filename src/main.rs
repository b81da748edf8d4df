use actix_web::{App, HttpServer, middleware, web};

use category_tree::cache::CategoryCache;
use category_tree::db::establish_connection_pool;
use category_tree::models::config::ServerConfig;
use category_tree::repository::DieselRepository;
use category_tree::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Category caches configured: {:?}", server_config.cache);

    let repo = web::Data::new(DieselRepository::new(pool));
    let cache = web::Data::new(CategoryCache::new(&server_config.cache));

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting server at {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .app_data(cache.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
