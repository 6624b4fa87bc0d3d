/// OpenGL debug output - routes KHR_debug messages to stderr with colors
///
/// Compiled only with the `gl-debug-output` feature. The callback keeps
/// per-severity counters and groups repeated messages so a report can be
/// printed when the demo exits.

use colored::*;
use glow::HasContext;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use learngl_engine::engine_warn;

/// Global debug configuration (shared with the callback)
static DEBUG_CONFIG: Mutex<Option<DebugConfig>> = Mutex::new(None);

/// Global message counters
static DEBUG_STATS: DebugStatsTracker = DebugStatsTracker::new();

/// Occurrences per message id
static MESSAGE_TRACKER: Mutex<Option<MessageTracker>> = Mutex::new(None);

/// Most distinct message ids counted; later ids are reported as first seen
pub(crate) const MAX_TRACKED_MESSAGES: usize = 1024;

/// Lowest driver severity that is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugSeverity {
    /// DEBUG_SEVERITY_HIGH only
    ErrorsOnly,
    /// HIGH and MEDIUM
    #[default]
    ErrorsAndWarnings,
    /// Everything, notifications included
    All,
}

/// Debug output configuration
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    pub severity: DebugSeverity,
    /// Abort the process on a HIGH severity message
    pub panic_on_error: bool,
    pub enable_stats: bool,
}

/// Message counts since `install`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugStats {
    pub errors: u32,
    pub warnings: u32,
    pub info: u32,
    pub notifications: u32,
}

impl DebugStats {
    pub fn total(&self) -> u32 {
        self.errors + self.warnings + self.info + self.notifications
    }
}

struct DebugStatsTracker {
    errors: AtomicU32,
    warnings: AtomicU32,
    info: AtomicU32,
    notifications: AtomicU32,
}

impl DebugStatsTracker {
    const fn new() -> Self {
        Self {
            errors: AtomicU32::new(0),
            warnings: AtomicU32::new(0),
            info: AtomicU32::new(0),
            notifications: AtomicU32::new(0),
        }
    }

    fn increment(&self, severity: u32) {
        let counter = match severity {
            glow::DEBUG_SEVERITY_HIGH => &self.errors,
            glow::DEBUG_SEVERITY_MEDIUM => &self.warnings,
            glow::DEBUG_SEVERITY_LOW => &self.info,
            _ => &self.notifications,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get(&self) -> DebugStats {
        DebugStats {
            errors: self.errors.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
            info: self.info.load(Ordering::Relaxed),
            notifications: self.notifications.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.errors.store(0, Ordering::Relaxed);
        self.warnings.store(0, Ordering::Relaxed);
        self.info.store(0, Ordering::Relaxed);
        self.notifications.store(0, Ordering::Relaxed);
    }
}

/// Repeat counter keyed by driver message id, bounded in size
pub(crate) struct MessageTracker {
    counts: FxHashMap<u32, u32>,
    capacity: usize,
}

impl MessageTracker {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { counts: FxHashMap::default(), capacity }
    }

    /// Record one occurrence of `id` and return its count so far
    pub(crate) fn track(&mut self, id: u32) -> u32 {
        if let Some(count) = self.counts.get_mut(&id) {
            *count += 1;
            return *count;
        }
        if self.counts.len() < self.capacity {
            self.counts.insert(id, 1);
        }
        1
    }

    pub(crate) fn repeated(&self) -> usize {
        self.counts.values().filter(|&&count| count > 1).count()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.counts.len()
    }
}

/// Whether a driver severity passes the configured filter
pub(crate) fn severity_passes(filter: DebugSeverity, severity: u32) -> bool {
    match filter {
        DebugSeverity::ErrorsOnly => severity == glow::DEBUG_SEVERITY_HIGH,
        DebugSeverity::ErrorsAndWarnings => {
            severity == glow::DEBUG_SEVERITY_HIGH || severity == glow::DEBUG_SEVERITY_MEDIUM
        }
        DebugSeverity::All => true,
    }
}

pub(crate) fn source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

pub(crate) fn type_name(message_type: u32) -> &'static str {
    match message_type {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        glow::DEBUG_TYPE_MARKER => "Marker",
        _ => "Other",
    }
}

/// Register the callback on a debug context
///
/// Returns false (and logs a warning) when the context does not
/// support KHR_debug.
pub fn install(gl: &mut glow::Context, config: DebugConfig) -> bool {
    if !gl.supports_debug() {
        engine_warn!("learngl::gl", "Context has no debug output support");
        return false;
    }

    DEBUG_STATS.reset();
    if let Ok(mut tracker) = MESSAGE_TRACKER.lock() {
        *tracker = Some(MessageTracker::with_capacity(MAX_TRACKED_MESSAGES));
    }
    if let Ok(mut lock) = DEBUG_CONFIG.lock() {
        *lock = Some(config);
    }

    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(debug_callback);
    }
    true
}

/// Current message counts
pub fn get_debug_stats() -> DebugStats {
    DEBUG_STATS.get()
}

/// Print the message statistics report
pub fn print_debug_stats_report() {
    let stats = get_debug_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No GL debug messages".green().bold());
        return;
    }

    println!("\n{}", "=== GL Debug Output Report ===".bright_blue().bold());
    if stats.errors > 0 {
        println!("  {} {}", "Errors:".red().bold(), stats.errors);
    }
    if stats.warnings > 0 {
        println!("  {} {}", "Warnings:".yellow().bold(), stats.warnings);
    }
    if stats.info > 0 {
        println!("  {} {}", "Info:".cyan(), stats.info);
    }
    if stats.notifications > 0 {
        println!("  {} {}", "Notifications:".bright_black(), stats.notifications);
    }
    println!("  {} {}", "Total:".white().bold(), stats.total());

    if let Ok(tracker) = MESSAGE_TRACKER.lock() {
        let repeated = tracker.as_ref().map(MessageTracker::repeated).unwrap_or(0);
        if repeated > 0 {
            println!("\n  {} {} message(s) appeared multiple times", "ℹ".cyan(), repeated);
        }
    }

    println!("{}\n", "==============================".bright_blue().bold());
}

fn debug_callback(source: u32, message_type: u32, id: u32, severity: u32, message: &str) {
    let config = match DEBUG_CONFIG.lock().ok().and_then(|lock| lock.clone()) {
        Some(config) => config,
        None => return,
    };

    if !severity_passes(config.severity, severity) {
        return;
    }

    let occurrences = if config.enable_stats {
        DEBUG_STATS.increment(severity);
        MESSAGE_TRACKER
            .lock()
            .ok()
            .map(|mut tracker| {
                tracker
                    .get_or_insert_with(|| MessageTracker::with_capacity(MAX_TRACKED_MESSAGES))
                    .track(id)
            })
            .unwrap_or(1)
    } else {
        1
    };

    let severity_colored = match severity {
        glow::DEBUG_SEVERITY_HIGH => "ERROR".red().bold(),
        glow::DEBUG_SEVERITY_MEDIUM => "WARNING".yellow().bold(),
        glow::DEBUG_SEVERITY_LOW => "INFO".cyan(),
        _ => "NOTIFICATION".bright_black(),
    };
    let repeat = if occurrences > 1 {
        format!(" [×{}]", occurrences)
    } else {
        String::new()
    };

    eprint!(
        "{} {} [{} / {}]{}\n  ├─ {}: {}\n  └─ {}\n",
        "[GL".bright_blue().bold(),
        format!("{}]", severity_colored).bright_blue().bold(),
        source_name(source).bright_black(),
        type_name(message_type).bright_black(),
        repeat.yellow(),
        "Message ID".bright_black(),
        id,
        message.white()
    );

    if config.panic_on_error && severity == glow::DEBUG_SEVERITY_HIGH {
        panic!("GL debug error ({}): {}", type_name(message_type), message);
    }
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
