mod resend_cooldown_tests;
