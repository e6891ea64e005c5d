//! Integration tests for Engine logging system
//!
//! These tests verify the logging system functionality and the entries
//! emitted by the portal frame loop.
//!
//! Run with: cargo test --test logging_integration_tests


use portal_3d_engine::glam::Vec3;
use portal_3d_engine::portal3d::log::{format_entry, Logger, LogEntry, LogSeverity};
use portal_3d_engine::portal3d::{Engine, PortalRenderer, PortalRendererConfig};
use portal_3d_engine::PhysicalSize;
use std::sync::{Arc, Mutex};
use serial_test::serial;
use test_utils::{corridor, main_camera, RecordingRenderer, AUX, MAIN};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn entries_from(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.source == source)
        .cloned()
        .collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Engine::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    let captured_entries = entries.lock().unwrap();
    assert_eq!(captured_entries.len(), 3);

    assert_eq!(captured_entries[0].severity, LogSeverity::Info);
    assert_eq!(captured_entries[0].source, "test::module");
    assert_eq!(captured_entries[0].message, "Test info message");

    assert_eq!(captured_entries[1].severity, LogSeverity::Warn);
    assert_eq!(captured_entries[1].message, "Test warning message");

    assert_eq!(captured_entries[2].severity, LogSeverity::Error);
    assert_eq!(captured_entries[2].message, "Test error message");

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    let captured_entries = entries.lock().unwrap();
    assert_eq!(captured_entries.len(), 1);

    let entry = &captured_entries[0];
    assert_eq!(entry.file, Some("test_file.rs"));
    assert_eq!(entry.line, Some(42));
    assert!(format_entry(entry).ends_with("[test::error] Critical error occurred (test_file.rs:42)"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    // Later messages go to the default logger
    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);
}

#[test]
#[serial]
fn test_integration_trace_filtered_by_default() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Trace, "test", "Trace message".to_string());
    Engine::log(LogSeverity::Debug, "test", "Debug message".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    Engine::set_min_severity(LogSeverity::Trace);
    Engine::log(LogSeverity::Trace, "test", "Trace message".to_string());
    assert_eq!(entries.lock().unwrap().len(), 2);

    Engine::set_min_severity(LogSeverity::Warn);
    Engine::log(LogSeverity::Info, "test", "Info message".to_string());
    assert_eq!(entries.lock().unwrap().len(), 2);

    Engine::reset_logger();
    assert_eq!(Engine::min_severity(), LogSeverity::Debug);
}

// ============================================================================
// FRAME LOOP LOGGING
// ============================================================================

#[test]
#[serial]
fn test_integration_pool_exhaustion_warns_once_per_frame() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let config = PortalRendererConfig { max_texture_allocations: 1, ..Default::default() };
    let mut portals = PortalRenderer::new(MAIN, AUX, PhysicalSize::new(640, 480), config).unwrap();
    let (mut set, _, _) = corridor();
    let mut renderer = RecordingRenderer::new();
    let camera = main_camera(Vec3::ZERO, Vec3::NEG_Z);

    let report = portals.on_frame_begin(&camera, &mut renderer, &mut set).unwrap();
    assert_eq!(report.stats.passes(), 1);

    let warnings = entries_from(&entries, "portal3d::VisibilityGraph");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, LogSeverity::Warn);
    assert!(warnings[0].message.contains("1 allocations"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_graph_traces_each_node() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut portals =
        PortalRenderer::new(MAIN, AUX, PhysicalSize::new(640, 480), PortalRendererConfig::default())
            .unwrap();
    let (mut set, _, _) = corridor();
    let mut renderer = RecordingRenderer::new();
    let camera = main_camera(Vec3::ZERO, Vec3::NEG_Z);

    // Hidden at the default minimum severity
    portals.on_frame_begin(&camera, &mut renderer, &mut set);
    portals.on_frame_end(&camera);
    assert!(entries_from(&entries, "portal3d::VisibilityGraph").is_empty());

    Engine::set_min_severity(LogSeverity::Trace);
    portals.on_frame_begin(&camera, &mut renderer, &mut set);

    let traces = entries_from(&entries, "portal3d::VisibilityGraph");
    assert_eq!(traces.len(), 5);
    assert!(traces.iter().all(|entry| entry.severity == LogSeverity::Trace));
    assert!(traces[0].message.ends_with("at depth 4"));
    assert!(traces[4].message.ends_with("at depth 0"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_lost_frame_end_is_reported() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut portals =
        PortalRenderer::new(MAIN, AUX, PhysicalSize::new(640, 480), PortalRendererConfig::default())
            .unwrap();
    let (mut set, _, _) = corridor();
    let mut renderer = RecordingRenderer::new();
    let camera = main_camera(Vec3::ZERO, Vec3::NEG_Z);

    portals.on_frame_begin(&camera, &mut renderer, &mut set);
    portals.on_frame_begin(&camera, &mut renderer, &mut set);

    let renderer_entries = entries_from(&entries, "portal3d::PortalRenderer");
    assert_eq!(renderer_entries[0].severity, LogSeverity::Info);
    let warnings: Vec<_> = renderer_entries
        .iter()
        .filter(|entry| entry.severity == LogSeverity::Warn)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("reclaiming 5 render targets"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_backend_failure_logged_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut portals =
        PortalRenderer::new(MAIN, AUX, PhysicalSize::new(640, 480), PortalRendererConfig::default())
            .unwrap();
    let (mut set, _, _) = corridor();
    let mut renderer = RecordingRenderer::out_of_memory_after(0);
    let camera = main_camera(Vec3::ZERO, Vec3::NEG_Z);

    let report = portals.on_frame_begin(&camera, &mut renderer, &mut set).unwrap();
    assert!(report.graph_aborted);

    let errors: Vec<_> = entries
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.severity == LogSeverity::Error)
        .cloned()
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].source, "portal3d::PortalRenderer");
    assert!(errors[0].message.contains("out of device memory"));
    assert!(errors[0].file.is_some_and(|file| file.ends_with("portal_renderer.rs")));
    assert!(errors[0].line.is_some());

    Engine::reset_logger();
}
