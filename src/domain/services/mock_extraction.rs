//! Simulated data extraction
//!
//! No device is touched. A run either returns a fixed demonstration dataset
//! or replays the content recovered by the wipe/recovery simulation.

use super::threat_link::threat_detection_link;
use crate::domain::entities::{ExtractionResult, ExtractionSource};

/// Demonstration dataset returned by mock runs
pub const MOCK_EXTRACTED_DATA: &str = r#"Contacts:
- John Doe: +1-555-1234, john.doe@email.com
- Jane Smith: +1-555-5678, jane.smith@email.com

Call Logs:
- Incoming: +1-555-9876 (2023-10-26 10:30 AM) - Duration: 5m 12s
- Outgoing: +1-555-4321 (2023-10-26 11:15 AM) - Duration: 2m 45s

SMS Messages:
- From +1-555-1122: "Hello, are you available for a meeting?" (2023-10-25 03:45 PM)
- To +1-555-3344: "Yes, I will be there." (2023-10-25 03:50 PM)

App Data (Partial):
- com.example.app/files/user_prefs.xml: <user_preferences><setting_a>true</setting_a><setting_b>false</setting_b></user_preferences>
- com.another.app/databases/messages.db: (Binary content placeholder)
"#;

/// Tool log accompanying [`MOCK_EXTRACTED_DATA`]
pub const MOCK_EXTRACTION_LOGS: &str = "\
[INFO] Starting data extraction process...
[INFO] Connecting to device... Device detected: Generic Android Device.
[INFO] Mounting /data partition... Success.
[INFO] Extracting contacts database (contacts2.db)... Done.
[INFO] Extracting call logs (calllog.db)... Done.
[INFO] Extracting SMS/MMS messages (mmssms.db)... Done.
[WARN] Some app data directories are encrypted or inaccessible. Skipping.
[INFO] Extracting /sdcard/DCIM/... Photos extracted: 15, Videos extracted: 3.
[INFO] Extracting /sdcard/Downloads/... Files extracted: 7.
[INFO] Data extraction process completed.
[SUMMARY] Total data extracted: 1.2 GB. Issues encountered: 2 (minor).
";

fn simulation_logs(bytes: usize) -> String {
    format!(
        "\
[INFO] Starting data extraction process...
[INFO] Source: simulated recovery workspace.
[INFO] Reading recovered file content... Done.
[INFO] Data extraction process completed.
[SUMMARY] Total data extracted: {bytes} bytes. Issues encountered: 0.
"
    )
}

/// Runs a simulated extraction
///
/// `Simulation` falls back to the mock dataset when no recovered content
/// is available.
pub fn extract(source: ExtractionSource, recovered: Option<&str>) -> ExtractionResult {
    let recovered = recovered.filter(|data| !data.trim().is_empty());

    let (source, extracted_data, extraction_logs) = match (source, recovered) {
        (ExtractionSource::Simulation, Some(data)) => (
            ExtractionSource::Simulation,
            data.to_string(),
            simulation_logs(data.len()),
        ),
        _ => (
            ExtractionSource::Mock,
            MOCK_EXTRACTED_DATA.to_string(),
            MOCK_EXTRACTION_LOGS.to_string(),
        ),
    };

    ExtractionResult {
        threat_detection_link: threat_detection_link(&extracted_data),
        source,
        extracted_data,
        extraction_logs,
    }
}
