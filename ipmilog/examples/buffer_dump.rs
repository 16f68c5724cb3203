use ipmilog::{
    DiagConfig, DiagnosticLogger, Severity, ipmi_buffer_debug, ipmi_info, lprintf,
    session_config,
};

fn main() {
    let _guard = session_config().with_name("buffer-dump").init_global();
    lprintf!(Severity::NOTICE, "Run with IPMI_LOGLEVEL=7 to see the dumps below");

    // Get Device ID response
    let response: [u8; 20] = [
        0x20, 0x1c, 0xc4, 0x81, 0x04, 0x01, 0x00, 0x20, 0x01, 0x81, 0x02, 0x01, 0xbf, 0x57,
        0x01, 0x00, 0x8a, 0x00, 0x00, 0x00,
    ];
    ipmi_info!("got {} bytes", response.len());
    ipmi_buffer_debug!(response, " Get Device ID");
    ipmi_buffer_debug!(b"BMC firmware 1.2");

    let path = std::env::temp_dir().join("ipmilog_example_buffer_dump.log");
    let logger = DiagnosticLogger::new(
        DiagConfig::default()
            .with_threshold(Severity::DEBUG)
            .with_log_file(&path),
    );
    logger.buffer_log(Severity::DEBUG, file!(), line!(), &response, None);
    println!("\n--- {} ---", path.display());
    print!("{}", std::fs::read_to_string(&path).unwrap());
}
