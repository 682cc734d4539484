use persephone_host::automation::MacAutomation;
use persephone_host::config::HostConfig;
use persephone_host::dispatch::{encode_response, respond};
use persephone_host::host::{get_message, send_frame, NmError};
use persephone_host::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), NmError> {
    init_logging();

    let automation = MacAutomation::new(HostConfig::default());
    let response = respond(get_message().await, &automation).await;
    let frame = encode_response(&response)?;
    send_frame(frame).await
}
