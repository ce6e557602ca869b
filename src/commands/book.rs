//! Book an appointment and send the confirmation

use crate::config::Config;
use crate::error::Result;
use crate::integrations::booking::{BookingClient, BookingFormData};

pub async fn run(
    name: &str,
    email: &str,
    phone: &str,
    service: &str,
    date: &str,
    time: &str,
) -> Result<()> {
    let form = BookingFormData {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        service: service.to_string(),
        date: date.to_string(),
        time: time.to_string(),
    };

    let config = Config::new();
    let client = BookingClient::new(&config);

    client.send_confirmation(&form).await;

    println!(
        "✓ Appointment confirmed: {} on {} at {}. A confirmation was sent to {}.",
        form.service, form.date, form.time, form.email
    );

    Ok(())
}
