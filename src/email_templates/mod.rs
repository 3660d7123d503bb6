use crate::registry::{Category, RegistryEntry};
use crate::template::EmailTemplate;

pub const WELCOME: EmailTemplate = EmailTemplate::new(
    "welcome-email",
    "Welcome Email",
    include_str!("welcome.html"),
);

pub const RESET_PASSWORD: EmailTemplate = EmailTemplate::new(
    "sample-reset-password",
    "Sample Reset Password",
    include_str!("reset_password.html"),
);

const WELCOME_SAMPLE: &[(&str, &str)] = &[
    ("company_name", "Acme Corp"),
    ("user_name", "John Doe"),
    ("get_started_url", "https://example.com/get-started"),
    ("dashboard_url", "https://example.com/dashboard"),
    ("feature_1_title", "Fast Setup"),
    ("feature_1_description", "Get up and running in minutes with our intuitive interface"),
    ("feature_2_title", "Smart Analytics"),
    ("feature_2_description", "Track your progress with detailed insights and reports"),
    ("feature_3_title", "Expert Support"),
    ("feature_3_description", "24/7 customer support to help you succeed"),
    ("cta_message", "Your account is ready and waiting for you. Let's dive in!"),
    ("help_url", "https://example.com/help"),
    ("support_email", "support@acmecorp.com"),
    ("facebook_url", "https://facebook.com/acmecorp"),
    ("twitter_url", "https://twitter.com/acmecorp"),
    ("linkedin_url", "https://linkedin.com/company/acmecorp"),
    ("company_address", "123 Business St, Suite 100, City, ST 12345"),
    ("unsubscribe_url", "https://example.com/unsubscribe"),
    ("preferences_url", "https://example.com/preferences"),
    ("background_color", "#f8f9fa"),
    ("text_color", "#333333"),
    ("container_background_color", "#ffffff"),
    ("primary_color", "#007ace"),
    ("secondary_color", "#0056b3"),
    ("button_color", "#28a745"),
    ("button_text_color", "#ffffff"),
    ("button_hover_color", "#218838"),
    ("feature_background_color", "#f8f9fa"),
    ("cta_background_color", "#e9ecef"),
    ("footer_background_color", "#f8f9fa"),
    ("footer_text_color", "#666666"),
];

const RESET_PASSWORD_SAMPLE: &[(&str, &str)] = &[
    ("company_name", "Acme Corp"),
    ("user_name", "Jane Smith"),
    ("reset_url", "https://example.com/reset-password?token=abc123"),
    ("expiry_time", "24 hours"),
    ("background_color", "#f4f5f6"),
    ("container_background", "#ffffff"),
    ("button_color", "#dc3545"),
    ("button_text_color", "#ffffff"),
];

/// Built-in registry contents in display order.
pub fn entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new(
            WELCOME,
            Category::General,
            "Professional welcome email with features showcase and modern design",
            WELCOME_SAMPLE,
        ),
        RegistryEntry::new(
            RESET_PASSWORD,
            Category::Authentication,
            "Password reset email with security warnings",
            RESET_PASSWORD_SAMPLE,
        ),
    ]
}
