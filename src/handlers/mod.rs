pub mod auth;
pub mod bids;
pub mod projects;
pub mod transactions;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (register/login are public, the rest need a session) ──
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/me", web::get().to(auth::me)),
    );

    // ── User routes ──
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(users::get_users))
            .route("/{id}", web::get().to(users::get_user))
            .route("/{id}", web::put().to(users::update_user))
            .route("/{id}", web::delete().to(users::delete_user))
            .route("/{id}/rate", web::post().to(users::rate_user)),
    );

    // ── Project routes ──
    cfg.service(
        web::scope("/project")
            .route("", web::post().to(projects::create_project))
            .route("", web::get().to(projects::get_projects))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::patch().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project))
            .route("/{id}/close", web::post().to(projects::close_project))
            .route("/{id}/mark-complete", web::post().to(projects::mark_complete))
            .route("/{id}/confirm", web::post().to(projects::confirm_completion))
            .route("/{id}/deliverable", web::patch().to(projects::submit_deliverable)),
    );

    // ── Bid routes (fixed segments registered before the parameterized ones) ──
    cfg.service(
        web::scope("/bid")
            .route("/my", web::get().to(bids::get_my_bids))
            .route("/project/{project_id}", web::get().to(bids::get_bids_by_project))
            .route("/award/{bid_id}", web::post().to(bids::award_bid))
            .route("/{project_id}", web::post().to(bids::place_bid))
            .route("/{bid_id}", web::patch().to(bids::update_bid))
            .route("/{bid_id}", web::delete().to(bids::delete_bid)),
    );

    // ── Wallet / ledger routes ──
    cfg.service(
        web::scope("/transaction")
            .route("/add-funds", web::post().to(transactions::add_funds))
            .route("/payment", web::post().to(transactions::pay_freelancer))
            .route("/my", web::get().to(transactions::get_my_transactions)),
    );
}
