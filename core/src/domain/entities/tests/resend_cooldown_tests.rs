use chrono::{Duration, Utc};

use crate::domain::entities::resend_cooldown::{ResendCooldown, RESEND_COOLDOWN_SECONDS};

#[test]
fn test_retry_after_rounds_up() {
    let sent = Utc::now();
    let cooldown = ResendCooldown::new("a@b.io", sent, RESEND_COOLDOWN_SECONDS);

    assert_eq!(cooldown.retry_after_seconds(sent), 300);
    assert_eq!(
        cooldown.retry_after_seconds(sent + Duration::milliseconds(299_500)),
        1
    );
    assert!(cooldown.is_active_at(sent + Duration::seconds(299)));
}

#[test]
fn test_window_elapses() {
    let sent = Utc::now();
    let cooldown = ResendCooldown::new("a@b.io", sent, RESEND_COOLDOWN_SECONDS);
    let later = sent + Duration::seconds(RESEND_COOLDOWN_SECONDS);

    assert!(!cooldown.is_active_at(later));
    assert_eq!(cooldown.retry_after_seconds(later), 0);
    assert_eq!(cooldown.available_at(), later);
}
