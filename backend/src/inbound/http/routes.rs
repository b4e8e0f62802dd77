//! Route table for the `/api` surface.

use actix_web::web;

use super::{activities, aggregation, babies, error, health, reminders, sharing, users};

/// Register every `/api` handler plus the extractor configs that turn
/// malformed input into `invalid_request` envelopes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use daybook::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .app_data(error::query_config())
        .service(
            web::scope("/api")
                .service(health::banner)
                .service(health::api_health)
                .service(users::exchange_session)
                .service(users::current_user)
                .service(users::logout)
                .service(babies::create_baby)
                .service(babies::list_babies)
                .service(babies::get_baby)
                .service(babies::update_baby)
                .service(babies::delete_baby)
                .service(activities::create_feeding)
                .service(activities::list_feedings)
                .service(activities::delete_feeding)
                .service(aggregation::sleep_prediction)
                .service(activities::create_sleep)
                .service(activities::list_sleeps)
                .service(activities::update_sleep)
                .service(activities::delete_sleep)
                .service(activities::create_diaper)
                .service(activities::list_diapers)
                .service(activities::delete_diaper)
                .service(activities::create_growth)
                .service(activities::list_growth)
                .service(activities::delete_growth)
                .service(aggregation::timeline)
                .service(aggregation::daily_stats)
                .service(sharing::create_invite)
                .service(sharing::pending_invites)
                .service(sharing::accept_invite)
                .service(sharing::decline_invite)
                .service(sharing::revoke_access)
                .service(reminders::create_reminder)
                .service(reminders::list_reminders)
                .service(reminders::delete_reminder),
        );
}
