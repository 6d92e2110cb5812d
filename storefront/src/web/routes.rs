// dishdash/storefront/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{cart_handlers, checkout_handlers, order_handlers, review_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      // Cart routes are anonymous, keyed by the cart cookie
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::get_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/items", web::post().to(cart_handlers::add_item_handler))
          .route("/items/{meal_id}", web::patch().to(cart_handlers::update_quantity_handler))
          .route("/items/{meal_id}", web::delete().to(cart_handlers::remove_item_handler))
          .route("/checkout-data", web::get().to(cart_handlers::checkout_data_handler)),
      )
      .route("/checkout", web::post().to(checkout_handlers::place_order_handler))
      .service(
        web::scope("/orders")
          .route("", web::get().to(order_handlers::all_orders_handler))
          .route("/mine", web::get().to(order_handlers::my_orders_handler))
          .route("/{order_id}", web::get().to(order_handlers::order_details_handler))
          .route("/{order_id}/status", web::patch().to(order_handlers::update_status_handler))
          .route("/{order_id}/cancel", web::post().to(order_handlers::cancel_order_handler))
          .route("/{order_id}/reviews", web::post().to(review_handlers::submit_review_handler)),
      )
      .route(
        "/order-statuses/{status}/next",
        web::get().to(order_handlers::next_statuses_handler),
      ),
  );
}
