use chrono::{DateTime, Utc};

use crate::entities::contact::SanitizedContact;

/// Shared styling for both messages.
const EMAIL_CSS: &str = r#"
    body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .header { background: #0A3A2E; color: white; padding: 20px; text-align: center; }
    .content { background: #f9f9f9; padding: 20px; }
    .field { margin-bottom: 15px; }
    .label { font-weight: bold; color: #0A3A2E; }
    .value { margin-top: 5px; }
    .cta { background: #0A3A2E; color: white; padding: 15px; text-align: center; margin: 20px 0; }
    .cta a { color: white; text-decoration: none; font-weight: bold; }
    .footer { background: #333; color: white; padding: 15px; text-align: center; font-size: 12px; }
"#;

fn field_block(label: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="field"><div class="label">{label}:</div><div class="value">{value}</div></div>"#
    )
}

/// Business-alert message carrying every submitted field. Inputs must
/// already be sanitized before they reach this interpolation.
pub fn business_notification(
    data: &SanitizedContact,
    business_name: &str,
    submitted_at: DateTime<Utc>,
) -> String {
    let details_html = data.details.replace('\n', "<br>");
    let fields = [
        field_block("Name", &data.name),
        field_block("Email", &data.email),
        field_block("Phone", &data.phone),
        field_block("Service Interested In", &data.service),
        field_block("Project Timeline", &data.timeline),
        field_block("Budget Range", &data.budget),
        field_block("Project Details", &details_html),
        field_block("How did they hear about us", &data.hear_about),
        field_block(
            "Submitted",
            &submitted_at.format("%B %e, %Y %H:%M UTC").to_string(),
        ),
    ]
    .concat();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>New Contact Form Submission</title>
  <style>{EMAIL_CSS}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>New Contact Form Submission</h1>
      <p>{business_name}</p>
    </div>
    <div class="content">{fields}</div>
    <div class="footer">
      <p>This email was sent from the {business_name} contact form.</p>
      <p>Please respond within 24 hours for the best customer experience.</p>
    </div>
  </div>
</body>
</html>"#
    )
}

/// Acknowledgment sent back to the visitor once the lead is captured.
pub fn acknowledgment(
    name: &str,
    business_name: &str,
    business_phone: &str,
    site_url: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Thank You for Contacting {business_name}</title>
  <style>{EMAIL_CSS}</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>Thank You, {name}!</h1>
      <p>{business_name}</p>
    </div>
    <div class="content">
      <p>Thank you for reaching out to {business_name}! We've received your message and appreciate your interest in our custom woodworking services.</p>
      <p><strong>What happens next?</strong></p>
      <ul>
        <li>We'll review your project details carefully</li>
        <li>One of our team members will contact you within 24 hours</li>
        <li>We'll schedule a consultation to discuss your vision</li>
        <li>You'll receive a detailed, free estimate</li>
      </ul>
      <p>In the meantime, feel free to browse our portfolio and learn more about our process:</p>
      <div class="cta">
        <a href="{site_url}/portfolio">View Our Recent Projects</a>
      </div>
      <p><strong>Need immediate assistance?</strong><br>
      Call us at {business_phone}</p>
      <p>We're excited to help bring your vision to life!</p>
    </div>
    <div class="footer">
      <p>{business_name} | {business_phone}</p>
    </div>
  </div>
</body>
</html>"#
    )
}
