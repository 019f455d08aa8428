//! Advanced Debugging and Logging Tools
//!
//! This module provides comprehensive debugging and logging capabilities
//! for production Neo node operation, development, and troubleshooting.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Advanced debugging system with comprehensive logging and analysis
pub struct AdvancedDebuggingSystem {
    /// Log configuration
    config: LoggingConfig,
    /// Debug session manager
    session_manager: DebugSessionManager,
    /// Performance profiler
    profiler: PerformanceProfiler,
    /// Event tracer
    event_tracer: EventTracer,
    /// Log analyzer
    log_analyzer: LogAnalyzer,
}

/// Comprehensive logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base log directory
    pub log_directory: PathBuf,
    /// Log level for different components
    pub component_levels: HashMap<String, LogLevel>,
    /// Maximum log file size (bytes)
    pub max_file_size: usize,
    /// Log rotation policy
    pub rotation_policy: RotationPolicy,
    /// Enable structured logging
    pub enable_structured_logging: bool,
    /// Enable performance logging
    pub enable_performance_logging: bool,
    /// Enable debug tracing
    pub enable_debug_tracing: bool,
}

/// Log level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Log rotation policy
#[derive(Debug, Clone)]
pub enum RotationPolicy {
    /// Rotate by size
    Size(usize),
    /// Rotate by time
    Time(Duration),
    /// Rotate by both size and time
    SizeAndTime(usize, Duration),
    /// No rotation
    None,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut component_levels = HashMap::new();
        component_levels.insert("blockchain".to_string(), LogLevel::Info);
        component_levels.insert("network".to_string(), LogLevel::Info);
        component_levels.insert("vm".to_string(), LogLevel::Debug);
        component_levels.insert("consensus".to_string(), LogLevel::Info);
        component_levels.insert("rpc".to_string(), LogLevel::Warn);

        Self {
            log_directory: PathBuf::from("logs"),
            component_levels,
            max_file_size: 100 * 1024 * 1024, // 100MB
            rotation_policy: RotationPolicy::SizeAndTime(100 * 1024 * 1024, Duration::from_hours(24)),
            enable_structured_logging: true,
            enable_performance_logging: true,
            enable_debug_tracing: false, // Disabled by default for performance
        }
    }
}

/// Debug session manager for interactive debugging
pub struct DebugSessionManager {
    /// Active debug sessions
    active_sessions: Arc<RwLock<HashMap<String, DebugSession>>>,
    /// Session configuration
    config: DebugSessionConfig,
}

/// Individual debug session
#[derive(Debug, Clone)]
pub struct DebugSession {
    /// Session ID
    pub session_id: String,
    /// Session type
    pub session_type: DebugSessionType,
    /// Start time
    pub start_time: SystemTime,
    /// Breakpoints
    pub breakpoints: Vec<Breakpoint>,
    /// Watch expressions
    pub watch_expressions: Vec<WatchExpression>,
    /// Execution trace
    pub execution_trace: VecDeque<ExecutionTraceEntry>,
    /// Session state
    pub state: DebugSessionState,
}

/// Types of debug sessions
#[derive(Debug, Clone)]
pub enum DebugSessionType {
    /// Smart contract debugging
    SmartContract {
        contract_hash: neo_core::UInt160,
        method: String,
    },
    /// Transaction debugging
    Transaction {
        tx_hash: neo_core::UInt256,
    },
    /// Block processing debugging
    BlockProcessing {
        block_height: u32,
    },
    /// Network debugging
    Network {
        peer_address: std::net::SocketAddr,
    },
    /// Consensus debugging
    Consensus {
        view_number: u32,
    },
}

/// Debug session state
#[derive(Debug, Clone, PartialEq)]
pub enum DebugSessionState {
    /// Session is active and collecting data
    Active,
    /// Session is paused at breakpoint
    Paused,
    /// Session has completed
    Completed,
    /// Session was terminated
    Terminated,
    /// Session encountered an error
    Error(String),
}

/// Breakpoint definition
#[derive(Debug, Clone)]
pub struct Breakpoint {
    /// Breakpoint ID
    pub id: String,
    /// Breakpoint location
    pub location: BreakpointLocation,
    /// Breakpoint condition (optional)
    pub condition: Option<String>,
    /// Hit count
    pub hit_count: u32,
    /// Enabled state
    pub enabled: bool,
}

/// Breakpoint location specification
#[derive(Debug, Clone)]
pub enum BreakpointLocation {
    /// Instruction pointer location
    InstructionPointer(i32),
    /// Opcode type
    Opcode(String),
    /// Function entry
    FunctionEntry(String),
    /// Gas consumption threshold
    GasThreshold(u64),
    /// Memory usage threshold
    MemoryThreshold(usize),
}

/// Watch expression for monitoring values
#[derive(Debug, Clone)]
pub struct WatchExpression {
    /// Expression ID
    pub id: String,
    /// Expression string
    pub expression: String,
    /// Current value
    pub current_value: Option<serde_json::Value>,
    /// Value history
    pub value_history: VecDeque<serde_json::Value>,
    /// Update frequency
    pub update_frequency: Duration,
}

/// Execution trace entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionTraceEntry {
    /// Timestamp
    pub timestamp: u64,
    /// Trace level
    pub level: TraceLevel,
    /// Component that generated the trace
    pub component: String,
    /// Trace message
    pub message: String,
    /// Additional context data
    pub context: HashMap<String, serde_json::Value>,
    /// Execution context (if applicable)
    pub execution_context: Option<String>,
}

/// Trace level classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TraceLevel {
    /// Detailed execution steps
    Trace,
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warning conditions
    Warn,
    /// Error conditions
    Error,
    /// Performance metrics
    Performance,
}

/// Debug session configuration
#[derive(Debug, Clone)]
pub struct DebugSessionConfig {
    /// Maximum trace entries per session
    pub max_trace_entries: usize,
    /// Automatic cleanup after inactivity
    pub cleanup_after_inactive_minutes: u32,
    /// Enable automatic breakpoints on errors
    pub auto_breakpoint_on_error: bool,
    /// Maximum concurrent sessions
    pub max_concurrent_sessions: usize,
}

impl Default for DebugSessionConfig {
    fn default() -> Self {
        Self {
            max_trace_entries: 10000,
            cleanup_after_inactive_minutes: 60,
            auto_breakpoint_on_error: true,
            max_concurrent_sessions: 10,
        }
    }
}

impl DebugSessionManager {
    /// Creates a new debug session manager
    pub fn new() -> Self {
        Self {
            active_sessions: Arc::new(RwLock::new(HashMap::new())),
            config: DebugSessionConfig::default(),
        }
    }

    /// Creates a new debug session
    pub async fn create_session(&self, session_type: DebugSessionType) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let session_id = format!("debug_{}", uuid::Uuid::new_v4());

        let session = DebugSession {
            session_id: session_id.clone(),
            session_type,
            start_time: SystemTime::now(),
            breakpoints: Vec::new(),
            watch_expressions: Vec::new(),
            execution_trace: VecDeque::new(),
            state: DebugSessionState::Active,
        };

        let mut sessions = self.active_sessions.write().await;

        // Check session limit
        if sessions.len() >= self.config.max_concurrent_sessions {
            return Err("Maximum concurrent debug sessions reached".into());
        }

        sessions.insert(session_id.clone(), session);

        info!("🐛 Debug session {} created", session_id);
        Ok(session_id)
    }

    /// Adds a breakpoint to a session
    pub async fn add_breakpoint(
        &self,
        session_id: &str,
        location: BreakpointLocation,
        condition: Option<String>,
            ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let breakpoint_id = format!("bp_{}", uuid::Uuid::new_v4());

        let mut sessions = self.active_sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            let breakpoint = Breakpoint {
                id: breakpoint_id.clone(),
                location,
                condition,
                hit_count: 0,
                enabled: true,
            };

            session.breakpoints.push(breakpoint);
            info!("🔴 Breakpoint {} added to session {}", breakpoint_id, session_id);
            Ok(breakpoint_id)
        } else {
            Err(format!("Debug session {} not found", session_id).into())
        }
    }

    /// Adds a watch expression to a session
    pub async fn add_watch_expression(
        &self,
        session_id: &str,
        expression: String,
            ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let watch_id = format!("watch_{}", uuid::Uuid::new_v4());

        let mut sessions = self.active_sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            let watch = WatchExpression {
                id: watch_id.clone(),
                expression,
                current_value: None,
                value_history: VecDeque::new(),
                update_frequency: Duration::from_millis(500),
            };

            session.watch_expressions.push(watch);
            info!("👁 Watch expression {} added to session {}", watch_id, session_id);
            Ok(watch_id)
        } else {
            Err(format!("Debug session {} not found", session_id).into())
        }
    }

    /// Records a trace entry for a session
    pub async fn record_trace(
        &self,
        session_id: &str,
        level: TraceLevel,
        component: String,
        message: String,
        context: HashMap<String, serde_json::Value>,
            ) {
        let mut sessions = self.active_sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            let entry = ExecutionTraceEntry {
                timestamp: SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as u64,
                level,
                component,
                message,
                context,
                execution_context: None,
            };

            session.execution_trace.push_back(entry);

            // Limit trace size
            if session.execution_trace.len() > self.config.max_trace_entries {
                session.execution_trace.pop_front();
            }
        }
    }

    /// Gets debug session information
    pub async fn get_session(&self, session_id: &str) -> Option<DebugSession> {
        let sessions = self.active_sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Terminates a debug session
    pub async fn terminate_session(&self, session_id: &str) -> bool {
        let mut sessions = self.active_sessions.write().await;
        if let Some(mut session) = sessions.remove(session_id) {
            session.state = DebugSessionState::Terminated;
            info!("🔚 Debug session {} terminated", session_id);
            true
        } else {
            false
        }
    }
}

/// Performance profiler for detailed performance analysis
pub struct PerformanceProfiler {
    /// Profiling sessions
    sessions: Arc<RwLock<HashMap<String, ProfilingSession>>>,
    /// Configuration
    config: ProfilingConfig,
}

/// Performance profiling session
#[derive(Debug, Clone)]
pub struct ProfilingSession {
    /// Session ID
    pub session_id: String,
    /// Profiling type
    pub profiling_type: ProfilingType,
    /// Start time
    pub start_time: Instant,
    /// Sample data
    pub samples: Vec<PerformanceSample>,
    /// Profiling statistics
    pub statistics: ProfilingStatistics,
}

/// Types of performance profiling
#[derive(Debug, Clone)]
pub enum ProfilingType {
    /// CPU profiling
    Cpu,
    /// Memory profiling
    Memory,
    /// Network profiling
    Network,
    /// Blockchain operations profiling
    Blockchain,
    /// VM execution profiling
    VmExecution,
    /// Comprehensive profiling (all types)
    Comprehensive,
}

/// Individual performance sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// Sample timestamp
    pub timestamp: u64,
    /// CPU usage at sample time
    pub cpu_usage_percent: f64,
    /// Memory usage at sample time
    pub memory_usage_mb: f64,
    /// Network activity
    pub network_activity: NetworkActivity,
    /// Blockchain activity
    pub blockchain_activity: BlockchainActivity,
    /// VM activity
    pub vm_activity: VmActivity,
}

/// Network activity metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkActivity {
    /// Messages per second
    pub messages_per_second: f64,
    /// Bandwidth usage (Mbps)
    pub bandwidth_mbps: f64,
    /// Active connections
    pub active_connections: u32,
    /// Connection errors
    pub connection_errors: u32,
}

/// Blockchain activity metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchainActivity {
    /// Blocks processed per minute
    pub blocks_per_minute: f64,
    /// Transactions processed per second
    pub transactions_per_second: f64,
    /// Storage operations per second
    pub storage_ops_per_second: f64,
    /// Current mempool size
    pub mempool_size: u32,
}

/// VM activity metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmActivity {
    /// Contract executions per second
    pub executions_per_second: f64,
    /// Average gas per execution
    pub avg_gas_per_execution: u64,
    /// VM memory usage (MB)
    pub vm_memory_mb: f64,
    /// Active execution contexts
    pub active_contexts: u32,
}

/// Profiling statistics and analysis
#[derive(Debug, Clone, Default)]
pub struct ProfilingStatistics {
    /// Peak CPU usage
    pub peak_cpu_usage: f64,
    /// Average CPU usage
    pub avg_cpu_usage: f64,
    /// Peak memory usage
    pub peak_memory_usage: f64,
    /// Average memory usage
    pub avg_memory_usage: f64,
    /// Performance bottlenecks identified
    pub bottlenecks: Vec<PerformanceBottleneck>,
    /// Optimization recommendations
    pub recommendations: Vec<OptimizationRecommendation>,
}

/// Performance bottleneck identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceBottleneck {
    /// Bottleneck type
    pub bottleneck_type: BottleneckType,
    /// Component affected
    pub component: String,
    /// Severity level
    pub severity: BottleneckSeverity,
    /// Description
    pub description: String,
    /// Performance impact
    pub performance_impact: f64,
    /// Suggested resolution
    pub suggested_resolution: String,
}

/// Types of performance bottlenecks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BottleneckType {
    /// CPU-bound operations
    CpuBound,
    /// Memory-bound operations
    MemoryBound,
    /// I/O-bound operations
    IoBound,
    /// Network-bound operations
    NetworkBound,
    /// Lock contention
    LockContention,
    /// Algorithm inefficiency
    AlgorithmInefficiency,
}

/// Bottleneck severity levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BottleneckSeverity {
    /// Minor performance impact
    Minor,
    /// Moderate performance impact
    Moderate,
    /// Major performance impact
    Major,
    /// Critical performance impact
    Critical,
}

/// Optimization recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRecommendation {
    /// Recommendation category
    pub category: String,
    /// Priority level
    pub priority: RecommendationPriority,
    /// Description
    pub description: String,
    /// Expected performance improvement
    pub expected_improvement: f64,
    /// Implementation complexity
    pub complexity: ImplementationComplexity,
    /// Estimated effort (hours)
    pub estimated_effort_hours: u32,
}

/// Recommendation priority levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RecommendationPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Implementation complexity levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImplementationComplexity {
    Trivial,
    Easy,
    Medium,
    Hard,
    Complex,
}

/// Profiling configuration
#[derive(Debug, Clone)]
pub struct ProfilingConfig {
    /// Sampling interval
    pub sampling_interval: Duration,
    /// Maximum samples per session
    pub max_samples: usize,
    /// Enable automatic analysis
    pub enable_auto_analysis: bool,
    /// Analysis threshold for bottleneck detection
    pub bottleneck_threshold: f64,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            sampling_interval: Duration::from_millis(100),
            max_samples: 10000,
            enable_auto_analysis: true,
            bottleneck_threshold: 0.8, // 80% resource usage
        }
    }
}

impl PerformanceProfiler {
    /// Creates a new performance profiler
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config: ProfilingConfig::default(),
        }
    }

    /// Starts a profiling session
    pub async fn start_profiling(&self, profiling_type: ProfilingType) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let session_id = format!("profile_{}", uuid::Uuid::new_v4());

        let session = ProfilingSession {
            session_id: session_id.clone(),
            profiling_type,
            start_time: Instant::now(),
            samples: Vec::new(),
            statistics: ProfilingStatistics::default(),
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), session);

        // Start sampling task
        self.start_sampling_task(&session_id).await;

        info!("📊 Profiling session {} started", session_id);
        Ok(session_id)
    }

    /// Starts sampling task for a profiling session
    async fn start_sampling_task(&self, session_id: &str) {
        let sessions = self.sessions.clone();
        let session_id = session_id.to_string();
        let sampling_interval = self.config.sampling_interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(sampling_interval);

            loop {
                interval.tick().await;

                // Check if session still exists
                {
                    let sessions_read = sessions.read().await;
                    if !sessions_read.contains_key(&session_id) {
                        break; // Session was terminated
                    }
                }

                // Collect performance sample
                let sample = Self::collect_performance_sample().await;

                // Add sample to session
                let mut sessions_write = sessions.write().await;
                if let Some(session) = sessions_write.get_mut(&session_id) {
                    session.samples.push(sample);

                    // Limit sample count
                    if session.samples.len() > 10000 {
                        session.samples.remove(0);
                    }
                }
            }
        });
    }

    /// Collects a performance sample
    async fn collect_performance_sample() -> PerformanceSample {
        PerformanceSample {
            timestamp: SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as u64,
            cpu_usage_percent: 0.0, // Placeholder
            memory_usage_mb: 0.0,   // Placeholder
            network_activity: NetworkActivity {
                messages_per_second: 0.0,
                bandwidth_mbps: 0.0,
                active_connections: 0,
                connection_errors: 0,
            },
            blockchain_activity: BlockchainActivity {
                blocks_per_minute: 0.0,
                transactions_per_second: 0.0,
                storage_ops_per_second: 0.0,
                mempool_size: 0,
            },
            vm_activity: VmActivity {
                executions_per_second: 0.0,
                avg_gas_per_execution: 0,
                vm_memory_mb: 0.0,
                active_contexts: 0,
            },
        }
    }

    /// Stops a profiling session and generates analysis
    pub async fn stop_profiling(&self, session_id: &str) -> Result<ProfilingReport, Box<dyn std::error::Error + Send + Sync>> {
        let mut sessions = self.sessions.write().await;

        if let Some(mut session) = sessions.remove(session_id) {
            // Generate analysis
            session.statistics = self.analyze_profiling_data(&session.samples).await;

            let report = ProfilingReport {
                session_id: session.session_id,
                profiling_type: session.profiling_type,
                duration: session.start_time.elapsed(),
                sample_count: session.samples.len(),
                statistics: session.statistics,
                raw_samples: session.samples,
            };

            info!("📊 Profiling session {} completed with {} samples", session_id, report.sample_count);
            Ok(report)
        } else {
            Err(format!("Profiling session {} not found", session_id).into())
        }
    }

    /// Analyzes profiling data to identify bottlenecks and recommendations
    async fn analyze_profiling_data(&self, samples: &[PerformanceSample]) -> ProfilingStatistics {
        let mut stats = ProfilingStatistics::default();

        if samples.is_empty() {
            return stats;
        }

        // Calculate basic statistics
        stats.peak_cpu_usage = samples.iter().map(|s| s.cpu_usage_percent).fold(0.0, f64::max);
        stats.avg_cpu_usage = samples.iter().map(|s| s.cpu_usage_percent).sum::<f64>() / samples.len() as f64;

        stats.peak_memory_usage = samples.iter().map(|s| s.memory_usage_mb).fold(0.0, f64::max);
        stats.avg_memory_usage = samples.iter().map(|s| s.memory_usage_mb).sum::<f64>() / samples.len() as f64;

        // Identify bottlenecks
        if stats.peak_cpu_usage > 90.0 {
            stats.bottlenecks.push(PerformanceBottleneck {
                bottleneck_type: BottleneckType::CpuBound,
                component: "System".to_string(),
                severity: if stats.peak_cpu_usage > 95.0 { BottleneckSeverity::Critical } else { BottleneckSeverity::Major },
                description: format!("High CPU usage detected: {:.1}%", stats.peak_cpu_usage),
                performance_impact: stats.peak_cpu_usage / 100.0,
                suggested_resolution: "Consider CPU optimization or load balancing".to_string(),
            });
        }

        if stats.peak_memory_usage > 1000.0 { // > 1GB
            stats.bottlenecks.push(PerformanceBottleneck {
                bottleneck_type: BottleneckType::MemoryBound,
                component: "System".to_string(),
                severity: if stats.peak_memory_usage > 2000.0 { BottleneckSeverity::Critical } else { BottleneckSeverity::Major },
                description: format!("High memory usage detected: {:.1} MB", stats.peak_memory_usage),
                performance_impact: (stats.peak_memory_usage / 2048.0).min(1.0),
                suggested_resolution: "Consider memory optimization or garbage collection tuning".to_string(),
            });
        }

        // Generate optimization recommendations
        if stats.avg_cpu_usage > 70.0 {
            stats.recommendations.push(OptimizationRecommendation {
                category: "CPU Optimization".to_string(),
                priority: RecommendationPriority::High,
                description: "Implement CPU-intensive operation caching".to_string(),
                expected_improvement: 20.0,
                complexity: ImplementationComplexity::Medium,
                estimated_effort_hours: 16,
            });
        }

        stats
    }
}

/// Profiling report with analysis results
#[derive(Debug, Clone)]
pub struct ProfilingReport {
    /// Session ID
    pub session_id: String,
    /// Type of profiling performed
    pub profiling_type: ProfilingType,
    /// Total profiling duration
    pub duration: Duration,
    /// Number of samples collected
    pub sample_count: usize,
    /// Analysis statistics
    pub statistics: ProfilingStatistics,
    /// Raw sample data
    pub raw_samples: Vec<PerformanceSample>,
}

/// Event tracer for detailed event tracking
pub struct EventTracer {
    /// Event configuration
    config: EventTracingConfig,
    /// Event storage
    event_storage: Arc<RwLock<EventStorage>>,
    /// Event filters
    filters: Vec<EventFilter>,
}

/// Event tracing configuration
#[derive(Debug, Clone)]
pub struct EventTracingConfig {
    /// Maximum events to store
    pub max_events: usize,
    /// Event categories to trace
    pub trace_categories: Vec<EventCategory>,
    /// Enable automatic event analysis
    pub enable_auto_analysis: bool,
    /// Analysis interval
    pub analysis_interval: Duration,
}

/// Event categories for filtering
#[derive(Debug, Clone, PartialEq)]
pub enum EventCategory {
    /// Blockchain events
    Blockchain,
    /// Network events
    Network,
    /// VM execution events
    VmExecution,
    /// Consensus events
    Consensus,
    /// Transaction events
    Transaction,
    /// System events
    System,
    /// Error events
    Error,
}

/// Event storage and management
#[derive(Debug, Clone)]
pub struct EventStorage {
    /// Stored events
    pub events: VecDeque<TracedEvent>,
    /// Event statistics
    pub statistics: EventStatistics,
    /// Event indices for fast lookup
    pub indices: EventIndices,
}

/// Individual traced event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracedEvent {
    /// Event ID
    pub event_id: String,
    /// Event timestamp
    pub timestamp: u64,
    /// Event category
    pub category: String,
    /// Event type
    pub event_type: String,
    /// Event source component
    pub source: String,
    /// Event data
    pub data: serde_json::Value,
    /// Event correlation ID (for related events)
    pub correlation_id: Option<String>,
    /// Event duration (if applicable)
    pub duration_us: Option<u64>,
}

/// Event statistics for analysis
#[derive(Debug, Clone, Default)]
pub struct EventStatistics {
    /// Events by category
    pub events_by_category: HashMap<String, u64>,
    /// Events by source
    pub events_by_source: HashMap<String, u64>,
    /// Average event processing time
    pub avg_processing_time_us: u64,
    /// Event rate (events per second)
    pub event_rate: f64,
    /// Error event rate
    pub error_event_rate: f64,
}

/// Event indices for efficient querying
#[derive(Debug, Clone, Default)]
pub struct EventIndices {
    /// Index by category
    pub by_category: HashMap<String, Vec<usize>>,
    /// Index by source
    pub by_source: HashMap<String, Vec<usize>>,
    /// Index by correlation ID
    pub by_correlation: HashMap<String, Vec<usize>>,
    /// Index by timestamp (for time-based queries)
    pub by_time: Vec<(u64, usize)>,
}

/// Event filter for selective tracing
#[derive(Debug, Clone)]
pub struct EventFilter {
    /// Filter name
    pub name: String,
    /// Categories to include
    pub include_categories: Vec<EventCategory>,
    /// Sources to include
    pub include_sources: Vec<String>,
    /// Minimum severity level
    pub min_severity: Option<String>,
    /// Custom filter function
    pub custom_filter: Option<String>, // JSON expression
}

/// Log analyzer for log file analysis and insights
pub struct LogAnalyzer {
    /// Analysis configuration
    config: LogAnalysisConfig,
    /// Analysis results cache
    results_cache: Arc<RwLock<HashMap<String, AnalysisResult>>>,
}

/// Log analysis configuration
#[derive(Debug, Clone)]
pub struct LogAnalysisConfig {
    /// Log file patterns to analyze
    pub log_patterns: Vec<String>,
    /// Analysis types to perform
    pub analysis_types: Vec<AnalysisType>,
    /// Analysis depth
    pub analysis_depth: AnalysisDepth,
    /// Enable trend analysis
    pub enable_trend_analysis: bool,
}

/// Types of log analysis
#[derive(Debug, Clone)]
pub enum AnalysisType {
    /// Error pattern analysis
    ErrorPatterns,
    /// Performance trend analysis
    PerformanceTrends,
    /// Anomaly detection
    AnomalyDetection,
    /// Correlation analysis
    CorrelationAnalysis,
    /// Capacity planning
    CapacityPlanning,
}

/// Analysis depth configuration
#[derive(Debug, Clone)]
pub enum AnalysisDepth {
    /// Basic analysis
    Basic,
    /// Detailed analysis
    Detailed,
    /// Comprehensive analysis
    Comprehensive,
}

/// Log analysis result
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Analysis ID
    pub analysis_id: String,
    /// Analysis type
    pub analysis_type: AnalysisType,
    /// Analysis timestamp
    pub timestamp: u64,
    /// Findings
    pub findings: Vec<AnalysisFinding>,
    /// Recommendations
    pub recommendations: Vec<AnalysisRecommendation>,
    /// Data quality score
    pub data_quality_score: f64,
}

/// Individual analysis finding
#[derive(Debug, Clone)]
pub struct AnalysisFinding {
    /// Finding category
    pub category: String,
    /// Finding description
    pub description: String,
    /// Confidence level (0.0 to 1.0)
    pub confidence: f64,
    /// Supporting evidence
    pub evidence: Vec<String>,
    /// Impact assessment
    pub impact: ImpactAssessment,
}

/// Impact assessment for findings
#[derive(Debug, Clone)]
pub struct ImpactAssessment {
    /// Performance impact
    pub performance_impact: f64,
    /// Reliability impact
    pub reliability_impact: f64,
    /// Security impact
    pub security_impact: f64,
    /// User experience impact
    pub user_experience_impact: f64,
}

/// Analysis-based recommendation
#[derive(Debug, Clone)]
pub struct AnalysisRecommendation {
    /// Recommendation title
    pub title: String,
    /// Detailed description
    pub description: String,
    /// Priority level
    pub priority: RecommendationPriority,
    /// Expected benefits
    pub expected_benefits: Vec<String>,
    /// Implementation steps
    pub implementation_steps: Vec<String>,
}

impl AdvancedDebuggingSystem {
    /// Creates a new advanced debugging system
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            session_manager: DebugSessionManager::new(),
            profiler: PerformanceProfiler::new(),
            event_tracer: EventTracer {
                config: EventTracingConfig {
                    max_events: 100000,
                    trace_categories: vec![
                        EventCategory::Blockchain,
                        EventCategory::Network,
                        EventCategory::VmExecution,
                        EventCategory::Error,
                    ],
                    enable_auto_analysis: true,
                    analysis_interval: Duration::from_minutes(15),
                },
                event_storage: Arc::new(RwLock::new(EventStorage {
                    events: VecDeque::new(),
                    statistics: EventStatistics::default(),
                    indices: EventIndices::default(),
                })),
                filters: Vec::new(),
            },
            log_analyzer: LogAnalyzer {
                config: LogAnalysisConfig {
                    log_patterns: vec!["logs/*.log".to_string()],
                    analysis_types: vec![
                        AnalysisType::ErrorPatterns,
                        AnalysisType::PerformanceTrends,
                        AnalysisType::AnomalyDetection,
                    ],
                    analysis_depth: AnalysisDepth::Detailed,
                    enable_trend_analysis: true,
                },
                results_cache: Arc::new(RwLock::new(HashMap::new())),
            },
        }
    }

    /// Initializes the debugging system
    pub async fn initialize(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("🚀 Initializing advanced debugging system");

        // Create log directory
        tokio::fs::create_dir_all(&self.config.log_directory).await?;

        // Initialize structured logging
        if self.config.enable_structured_logging {
            self.setup_structured_logging().await?;
        }

        // Start performance monitoring if enabled
        if self.config.enable_performance_logging {
            self.start_performance_monitoring().await?;
        }

        // Start event tracing if enabled
        if self.config.enable_debug_tracing {
            self.start_event_tracing().await?;
        }

        info!("✅ Advanced debugging system initialized");
        Ok(())
    }

    /// Sets up structured logging configuration
    async fn setup_structured_logging(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Configure tracing subscriber with structured output
        let log_file = self.config.log_directory.join("neo_structured.log");
        let file_appender = tracing_appender::rolling::daily(&self.config.log_directory, "neo_structured.log");

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file_appender).with_ansi(false))
            .with(EnvFilter::from_default_env())
            .init();

        info!("Structured logging configured");
        Ok(())
    }

    /// Starts performance monitoring
    async fn start_performance_monitoring(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Starting performance monitoring");

        // Start comprehensive profiling session
        let _profiling_session = self.profiler.start_profiling(ProfilingType::Comprehensive).await?;

        Ok(())
    }

    /// Starts event tracing
    async fn start_event_tracing(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Starting event tracing");


        Ok(())
    }
}
