use crate::{reminder::run_reminder_pass::RunReminderPassUseCase, shared::usecase::execute};
use actix_web::rt::time::sleep;
use chrono::{DateTime, Days, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc};
use kurator_domain::Tz;
use kurator_infra::KuratorContext;
use std::time::Duration;
use tracing::{error, info};

/// First instant at or after `naive` local time that exists in `tz`
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        // Skipped by a daylight saving gap, run once the clocks have jumped
        LocalResult::None => tz
            .from_local_datetime(&(naive + chrono::Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

/// Time from `now` until the next `hour`:00 in `tz`, strictly after `now`
pub fn get_start_delay(now: DateTime<Utc>, tz: Tz, hour: u32) -> Duration {
    let local_now = now.with_timezone(&tz).naive_local();
    let run_time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default();

    let mut date = local_now.date();
    if local_now.time() >= run_time {
        date = date.checked_add_days(Days::new(1)).unwrap_or(date);
    }
    let next_run = resolve_local(tz, date.and_time(run_time)).unwrap_or(now);

    (next_run - now).to_std().unwrap_or(Duration::ZERO)
}

/// Runs the reminder pass once a day at the configured hour
pub fn start_reminder_job(ctx: KuratorContext) {
    let job = ctx.config.reminder_job.clone();
    if !job.enabled {
        info!("Daily reminder job is disabled");
        return;
    }
    let tz = ctx.config.reminder_timezone;

    actix_web::rt::spawn(async move {
        loop {
            let delay = get_start_delay(ctx.sys.now(), tz, job.hour);
            info!(
                "Next daily reminder run in {} seconds ({}:00 {})",
                delay.as_secs(),
                job.hour,
                tz
            );
            sleep(delay).await;

            let usecase = RunReminderPassUseCase {
                force: false,
                threshold_days: None,
                min_interval_hours: None,
            };
            match execute(usecase, &ctx).await {
                Ok(summary) => info!("Daily reminder run finished: {}", summary.message),
                Err(e) => error!("Daily reminder run failed: {:?}", e),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn start_delay_works() {
        let utc = chrono_tz::UTC;
        assert_eq!(
            get_start_delay(at(2024, 5, 10, 7, 30), utc, 8),
            Duration::from_secs(30 * 60)
        );
        // Exactly at the run time the next run is tomorrow
        assert_eq!(
            get_start_delay(at(2024, 5, 10, 8, 0), utc, 8),
            Duration::from_secs(24 * 60 * 60)
        );
        assert_eq!(
            get_start_delay(at(2024, 5, 10, 23, 0), utc, 0),
            Duration::from_secs(60 * 60)
        );
    }

    #[test]
    fn start_delay_follows_the_reminder_timezone() {
        // 08:00 in Oslo is 06:00 UTC during summer time
        let oslo = chrono_tz::Europe::Oslo;
        assert_eq!(
            get_start_delay(at(2024, 6, 1, 5, 0), oslo, 8),
            Duration::from_secs(60 * 60)
        );
        // Summer time starts 2024-03-31, the day is 23 hours long
        assert_eq!(
            get_start_delay(at(2024, 3, 30, 7, 0), oslo, 8),
            Duration::from_secs(23 * 60 * 60)
        );
    }
}
