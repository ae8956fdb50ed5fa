use actix_web::web;
mod handlers;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(handlers::get_network_status)
            .service(handlers::get_wallet_balances)
            .service(handlers::get_bridge_balances)
            .service(handlers::max_amount)
            .service(handlers::validate_amount),
    );
}
