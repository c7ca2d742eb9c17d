use crate::notification::send_due_notifications::SendDueNotificationsUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep};
use beacon_infra::BeaconContext;
use std::time::Duration;

const HOUR_MILLIS: i64 = 1000 * 60 * 60;

/// Millis until the next wall-clock hour boundary. The notification tick
/// aligns itself to :00 so the timezone reverse-lookup sees a stable hour.
pub fn millis_to_next_hour(now_ts: i64) -> u64 {
    (HOUR_MILLIS - now_ts.rem_euclid(HOUR_MILLIS)) as u64
}

pub fn start_send_notifications_job(ctx: BeaconContext) {
    actix_web::rt::spawn(async move {
        let delay = millis_to_next_hour(ctx.sys.get_timestamp_millis());
        sleep(Duration::from_millis(delay)).await;

        let mut hourly_interval = interval(Duration::from_millis(HOUR_MILLIS as u64));
        loop {
            hourly_interval.tick().await;
            let _ = execute(SendDueNotificationsUseCase {}, &ctx).await;
        }
    });
}
