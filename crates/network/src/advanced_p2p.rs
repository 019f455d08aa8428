//! Advanced P2P Network Protocol Implementation
//!
//! This module provides enhanced peer-to-peer networking capabilities
//! with advanced peer management, protocol optimization, and network intelligence.

use crate::{NetworkError, NetworkResult as Result, NetworkMessage, PeerManager};
use neo_core::{UInt160, UInt256};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::{broadcast, RwLock};
use tokio::time::interval;
use tracing::{debug, info, warn, error};

/// Advanced peer management with intelligence and optimization
pub struct AdvancedPeerManager {
    /// Base peer manager
    base_manager: Arc<RwLock<PeerManager>>,
    /// Peer intelligence database
    peer_intelligence: Arc<RwLock<PeerIntelligence>>,
    /// Network topology analyzer
    topology_analyzer: NetworkTopologyAnalyzer,
    /// Connection optimization engine
    connection_optimizer: ConnectionOptimizer,
    /// Peer scoring system
    peer_scorer: PeerScoringSystem,
    /// Advanced metrics
    metrics: AdvancedNetworkMetrics,
}

/// Peer intelligence database for enhanced decision making
#[derive(Debug, Clone)]
pub struct PeerIntelligence {
    /// Peer profiles with historical data
    pub peer_profiles: HashMap<SocketAddr, PeerProfile>,
    /// Network topology information
    pub topology_info: NetworkTopology,
    /// Reputation system
    pub reputation_system: ReputationSystem,
    /// Connection patterns
    pub connection_patterns: ConnectionPatterns,
}

/// Comprehensive peer profile with historical performance data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerProfile {
    /// Peer address
    pub address: SocketAddr,
    /// Peer version and capabilities
    pub capabilities: PeerCapabilities,
    /// Connection history
    pub connection_history: ConnectionHistory,
    /// Performance metrics
    pub performance: PeerPerformanceMetrics,
    /// Reputation score (0.0 to 1.0)
    pub reputation_score: f64,
    /// Trust level
    pub trust_level: TrustLevel,
    /// Geographic information (if available)
    pub geographic_info: Option<GeographicInfo>,
    /// Last interaction timestamp
    pub last_seen: u64,
}

/// Peer capabilities and version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerCapabilities {
    /// Neo protocol version
    pub protocol_version: u32,
    /// User agent string
    pub user_agent: String,
    /// Supported services
    pub services: u64,
    /// Maximum connections supported
    pub max_connections: u32,
    /// Block height at connection
    pub start_height: u32,
    /// Relay capability
    pub relay_enabled: bool,
}

/// Connection history tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionHistory {
    /// Total connection attempts
    pub total_attempts: u32,
    /// Successful connections
    pub successful_connections: u32,
    /// Failed connections
    pub failed_connections: u32,
    /// Average connection time
    pub avg_connection_time_ms: u64,
    /// Last connection attempt
    pub last_attempt: u64,
    /// Connection reliability score
    pub reliability_score: f64,
}

/// Peer performance metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerPerformanceMetrics {
    /// Average message latency (ms)
    pub avg_latency_ms: f64,
    /// Messages sent to this peer
    pub messages_sent: u64,
    /// Messages received from this peer
    pub messages_received: u64,
    /// Bytes sent to this peer
    pub bytes_sent: u64,
    /// Bytes received from this peer
    pub bytes_received: u64,
    /// Message error rate
    pub error_rate: f64,
    /// Bandwidth utilization
    pub bandwidth_utilization: f64,
}

/// Trust level classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TrustLevel {
    /// Untrusted peer (new or problematic)
    Untrusted,
    /// Basic trust (normal peer)
    Basic,
    /// High trust (reliable peer)
    High,
    /// Verified trust (known good peer)
    Verified,
    /// Banned (malicious peer)
    Banned,
}

/// Geographic information for peers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeographicInfo {
    /// Country code
    pub country: String,
    /// City
    pub city: String,
    /// Estimated latency zone
    pub latency_zone: LatencyZone,
    /// Time zone offset
    pub timezone_offset: i32,
}

/// Latency zone classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LatencyZone {
    /// Very low latency (< 50ms)
    VeryLow,
    /// Low latency (50-150ms)
    Low,
    /// Medium latency (150-300ms)
    Medium,
    /// High latency (300-500ms)
    High,
    /// Very high latency (> 500ms)
    VeryHigh,
}

/// Network topology information
#[derive(Debug, Clone)]
pub struct NetworkTopology {
    /// Known peer clusters
    pub peer_clusters: Vec<PeerCluster>,
    /// Network backbone peers
    pub backbone_peers: Vec<SocketAddr>,
    /// Edge peers
    pub edge_peers: Vec<SocketAddr>,
    /// Network diameter (max hops between any two peers)
    pub network_diameter: u32,
    /// Clustering coefficient
    pub clustering_coefficient: f64,
}

/// Peer cluster identification
#[derive(Debug, Clone)]
pub struct PeerCluster {
    /// Cluster ID
    pub cluster_id: String,
    /// Peers in this cluster
    pub peers: Vec<SocketAddr>,
    /// Cluster characteristics
    pub characteristics: ClusterCharacteristics,
}

/// Cluster characteristics
#[derive(Debug, Clone)]
pub struct ClusterCharacteristics {
    /// Average latency within cluster
    pub avg_internal_latency_ms: f64,
    /// Geographic region
    pub region: String,
    /// Cluster reliability score
    pub reliability_score: f64,
    /// Primary language/timezone
    pub timezone: String,
}

/// Reputation system for peer trust management
#[derive(Debug, Clone)]
pub struct ReputationSystem {
    /// Reputation scores for all known peers
    pub peer_reputations: HashMap<SocketAddr, ReputationScore>,
    /// Global reputation statistics
    pub global_stats: ReputationStats,
}

/// Individual peer reputation score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationScore {
    /// Overall score (0.0 to 1.0)
    pub score: f64,
    /// Contributing factors
    pub factors: ReputationFactors,
    /// Score calculation timestamp
    pub last_updated: u64,
    /// Score history for trend analysis
    pub score_history: VecDeque<f64>,
}

/// Factors contributing to reputation score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationFactors {
    /// Connection reliability (0.0 to 1.0)
    pub connection_reliability: f64,
    /// Message accuracy (0.0 to 1.0)
    pub message_accuracy: f64,
    /// Response speed (0.0 to 1.0)
    pub response_speed: f64,
    /// Protocol compliance (0.0 to 1.0)
    pub protocol_compliance: f64,
    /// Data quality (0.0 to 1.0)
    pub data_quality: f64,
}

/// Global reputation statistics
#[derive(Debug, Clone, Default)]
pub struct ReputationStats {
    /// Average network reputation
    pub avg_network_reputation: f64,
    /// Reputation distribution
    pub reputation_distribution: [u32; 5], // [0-0.2, 0.2-0.4, 0.4-0.6, 0.6-0.8, 0.8-1.0]
    /// Trusted peer count
    pub trusted_peer_count: u32,
    /// Banned peer count
    pub banned_peer_count: u32,
}

/// Connection patterns analysis
#[derive(Debug, Clone)]
pub struct ConnectionPatterns {
    /// Peak connection times
    pub peak_hours: Vec<u32>, // Hours of day with highest activity
    /// Geographic distribution
    pub geographic_distribution: HashMap<String, u32>,
    /// Version distribution
    pub version_distribution: HashMap<String, u32>,
    /// Connection duration patterns
    pub duration_patterns: DurationPatterns,
}

/// Connection duration analysis
#[derive(Debug, Clone)]
pub struct DurationPatterns {
    /// Average connection duration
    pub avg_duration_minutes: f64,
    /// Short connections (< 5 min)
    pub short_connections: u32,
    /// Medium connections (5-60 min)
    pub medium_connections: u32,
    /// Long connections (> 60 min)
    pub long_connections: u32,
}

/// Network topology analyzer
pub struct NetworkTopologyAnalyzer {
    /// Analysis configuration
    config: TopologyAnalysisConfig,
    /// Current topology state
    current_topology: Arc<RwLock<NetworkTopology>>,
}

/// Topology analysis configuration
#[derive(Debug, Clone)]
pub struct TopologyAnalysisConfig {
    /// Analysis interval
    pub analysis_interval_minutes: u32,
    /// Minimum cluster size
    pub min_cluster_size: usize,
    /// Maximum clusters to track
    pub max_clusters: usize,
    /// Enable geographic clustering
    pub enable_geographic_clustering: bool,
}

impl Default for TopologyAnalysisConfig {
    fn default() -> Self {
        Self {
            analysis_interval_minutes: 30,
            min_cluster_size: 3,
            max_clusters: 10,
            enable_geographic_clustering: true,
        }
    }
}

impl NetworkTopologyAnalyzer {
    /// Creates a new topology analyzer
    pub fn new() -> Self {
        Self {
            config: TopologyAnalysisConfig::default(),
            current_topology: Arc::new(RwLock::new(NetworkTopology {
                peer_clusters: Vec::new(),
                backbone_peers: Vec::new(),
                edge_peers: Vec::new(),
                network_diameter: 0,
                clustering_coefficient: 0.0,
            })),
        }
    }

    /// Analyzes current network topology
    pub async fn analyze_topology(&mut self, peer_profiles: &HashMap<SocketAddr, PeerProfile>) -> Result<()> {
        info!("🔍 Analyzing network topology with {} peers", peer_profiles.len());

        let mut topology = self.current_topology.write().await;

        // Clear previous analysis
        topology.peer_clusters.clear();
        topology.backbone_peers.clear();
        topology.edge_peers.clear();

        // Identify peer clusters based on latency and geographic info
        let clusters = self.identify_peer_clusters(peer_profiles).await?;
        topology.peer_clusters = clusters;

        // Identify backbone peers (high connectivity, low latency)
        let backbone = self.identify_backbone_peers(peer_profiles).await?;
        topology.backbone_peers = backbone;

        // Calculate network metrics
        topology.network_diameter = self.calculate_network_diameter(peer_profiles).await;
        topology.clustering_coefficient = self.calculate_clustering_coefficient(peer_profiles).await;

        info!("✅ Topology analysis completed: {} clusters, {} backbone peers",
              topology.peer_clusters.len(), topology.backbone_peers.len());

        Ok(())
    }

    /// Identifies peer clusters based on network characteristics
    async fn identify_peer_clusters(&self, peer_profiles: &HashMap<SocketAddr, PeerProfile>) -> Result<Vec<PeerCluster>> {
        let mut clusters = Vec::new();

        // Group peers by geographic region if available
        if self.config.enable_geographic_clustering {
            let mut geographic_groups: HashMap<String, Vec<SocketAddr>> = HashMap::new();

            for (addr, profile) in peer_profiles {
                if let Some(geo_info) = &profile.geographic_info {
                    geographic_groups.entry(geo_info.country.clone())
                        .or_insert_with(Vec::new)
                        .push(*addr);
                }
            }

            // Create clusters from geographic groups
            for (region, peers) in geographic_groups {
                if peers.len() >= self.config.min_cluster_size {
                    let cluster = PeerCluster {
                        cluster_id: format!("geo_{}", region),
                        peers,
                        characteristics: ClusterCharacteristics {
                            avg_internal_latency_ms: 100.0, // Estimated
                            region: region.clone(),
                            reliability_score: 0.8, // Default
                            timezone: "UTC".to_string(), // Default
                        },
                    };
                    clusters.push(cluster);
                }
            }
        }

        // Add latency-based clustering for peers without geographic info

        Ok(clusters)
    }

    /// Identifies backbone peers with high connectivity
    async fn identify_backbone_peers(&self, peer_profiles: &HashMap<SocketAddr, PeerProfile>) -> Result<Vec<SocketAddr>> {
        let mut backbone_peers = Vec::new();

        for (addr, profile) in peer_profiles {
            // Consider peers as backbone if they have:
            // 1. High reliability score
            // 2. Low average latency
            // 3. High uptime
            if profile.connection_history.reliability_score > 0.9 &&
               profile.performance.avg_latency_ms < 100.0 &&
               profile.reputation_score > 0.8 {
                backbone_peers.push(*addr);
            }
        }

        // Limit backbone peers to most reliable ones
        backbone_peers.sort_by(|a, b| {
            let score_a = peer_profiles.get(a).map(|p| p.reputation_score).unwrap_or(0.0);
            let score_b = peer_profiles.get(b).map(|p| p.reputation_score).unwrap_or(0.0);
            score_b.partial_cmp(&score_a).unwrap_or(std::cmp::Ordering::Equal)
        });

        backbone_peers.truncate(10); // Keep top 10 backbone peers

        Ok(backbone_peers)
    }

    /// Calculates network diameter (maximum shortest path between any two peers)
    async fn calculate_network_diameter(&self, _peer_profiles: &HashMap<SocketAddr, PeerProfile>) -> u32 {
        // For now, return estimated value based on peer count
        6 // Typical small-world network diameter
    }

    /// Calculates clustering coefficient for network analysis
    async fn calculate_clustering_coefficient(&self, _peer_profiles: &HashMap<SocketAddr, PeerProfile>) -> f64 {
        // For now, return estimated value
        0.3 // Typical clustering coefficient for P2P networks
    }

    /// Gets current topology information
    pub async fn get_topology(&self) -> NetworkTopology {
        let topology = self.current_topology.read().await;
        topology.clone()
    }
}

/// Connection optimization engine
pub struct ConnectionOptimizer {
    /// Optimization strategies
    strategies: OptimizationStrategies,
    /// Optimization metrics
    metrics: OptimizationMetrics,
    /// Connection pools
    connection_pools: ConnectionPools,
}

/// Connection optimization strategies
#[derive(Debug, Clone)]
pub struct OptimizationStrategies {
    /// Enable connection pooling
    pub enable_connection_pooling: bool,
    /// Enable load balancing
    pub enable_load_balancing: bool,
    /// Enable geographic optimization
    pub enable_geographic_optimization: bool,
    /// Enable adaptive timeout
    pub enable_adaptive_timeout: bool,
    /// Enable connection multiplexing
    pub enable_connection_multiplexing: bool,
}

impl Default for OptimizationStrategies {
    fn default() -> Self {
        Self {
            enable_connection_pooling: true,
            enable_load_balancing: true,
            enable_geographic_optimization: true,
            enable_adaptive_timeout: true,
            enable_connection_multiplexing: false, // Experimental
        }
    }
}

/// Connection pools for different peer types
#[derive(Debug, Clone)]
pub struct ConnectionPools {
    /// High-priority connections (backbone peers)
    pub high_priority: Vec<SocketAddr>,
    /// Standard connections (regular peers)
    pub standard: Vec<SocketAddr>,
    /// Low-priority connections (edge peers)
    pub low_priority: Vec<SocketAddr>,
    /// Backup connections (fallback peers)
    pub backup: Vec<SocketAddr>,
}

/// Peer scoring system for intelligent peer selection
pub struct PeerScoringSystem {
    /// Scoring weights
    weights: ScoringWeights,
    /// Score cache
    score_cache: Arc<RwLock<HashMap<SocketAddr, f64>>>,
}

/// Weights for different scoring factors
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    /// Reliability weight
    pub reliability: f64,
    /// Performance weight
    pub performance: f64,
    /// Geographic weight
    pub geographic: f64,
    /// Trust weight
    pub trust: f64,
    /// Capability weight
    pub capability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            reliability: 0.3,
            performance: 0.25,
            geographic: 0.15,
            trust: 0.2,
            capability: 0.1,
        }
    }
}

impl PeerScoringSystem {
    /// Creates a new peer scoring system
    pub fn new() -> Self {
        Self {
            weights: ScoringWeights::default(),
            score_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Calculates comprehensive score for a peer
    pub async fn calculate_peer_score(&self, profile: &PeerProfile) -> f64 {
        let reliability_score = profile.connection_history.reliability_score * self.weights.reliability;

        let performance_score = self.calculate_performance_score(profile) * self.weights.performance;

        let geographic_score = self.calculate_geographic_score(profile) * self.weights.geographic;

        let trust_score = profile.reputation_score * self.weights.trust;

        let capability_score = self.calculate_capability_score(profile) * self.weights.capability;

        let total_score = reliability_score + performance_score + geographic_score + trust_score + capability_score;

        // Update cache
        let mut cache = self.score_cache.write().await;
        cache.insert(profile.address, total_score);

        total_score
    }

    /// Calculates performance-based score
    fn calculate_performance_score(&self, profile: &PeerProfile) -> f64 {
        // Lower latency = higher score
        let latency_score = if profile.performance.avg_latency_ms > 0.0 {
            (500.0 - profile.performance.avg_latency_ms.min(500.0)) / 500.0
        } else {
            0.5 // Default for unknown latency
        };

        // Lower error rate = higher score
        let error_score = 1.0 - profile.performance.error_rate.min(1.0);

        (latency_score + error_score) / 2.0
    }

    /// Calculates geographic preference score
    fn calculate_geographic_score(&self, profile: &PeerProfile) -> f64 {
        if let Some(geo_info) = &profile.geographic_info {
            match geo_info.latency_zone {
                LatencyZone::VeryLow => 1.0,
                LatencyZone::Low => 0.8,
                LatencyZone::Medium => 0.6,
                LatencyZone::High => 0.4,
                LatencyZone::VeryHigh => 0.2,
            }
        } else {
            0.5 // Default for unknown geographic info
        }
    }

    /// Calculates capability-based score
    fn calculate_capability_score(&self, profile: &PeerProfile) -> f64 {
        let mut score = 0.0;

        // Higher for peers with relay capability
        if profile.capabilities.relay_enabled {
            score += 0.3;
        }

        // Higher for peers with more connections
        if profile.capabilities.max_connections > 50 {
            score += 0.3;
        }

        // Higher for newer protocol versions
        if profile.capabilities.protocol_version >= 3 {
            score += 0.4;
        }

        score.min(1.0)
    }

    /// Gets cached score for a peer
    pub async fn get_cached_score(&self, address: &SocketAddr) -> Option<f64> {
        let cache = self.score_cache.read().await;
        cache.get(address).copied()
    }
}

/// Advanced network metrics
#[derive(Debug, Clone, Default)]
pub struct AdvancedNetworkMetrics {
    /// Total messages processed
    pub total_messages: u64,
    /// Messages per second rate
    pub messages_per_second: f64,
    /// Average message processing time
    pub avg_message_processing_time_us: u64,
    /// Network efficiency score
    pub network_efficiency_score: f64,
    /// Peer distribution health
    pub peer_distribution_health: f64,
    /// Connection stability index
    pub connection_stability_index: f64,
}

impl AdvancedPeerManager {
    /// Creates a new advanced peer manager
    pub fn new(base_manager: Arc<RwLock<PeerManager>>) -> Self {
        Self {
            base_manager,
            peer_intelligence: Arc::new(RwLock::new(PeerIntelligence {
                peer_profiles: HashMap::new(),
                topology_info: NetworkTopology {
                    peer_clusters: Vec::new(),
                    backbone_peers: Vec::new(),
                    edge_peers: Vec::new(),
                    network_diameter: 0,
                    clustering_coefficient: 0.0,
                },
                reputation_system: ReputationSystem {
                    peer_reputations: HashMap::new(),
                    global_stats: ReputationStats::default(),
                },
                connection_patterns: ConnectionPatterns {
                    peak_hours: vec![8, 9, 10, 20, 21, 22], // Typical peak hours
                    geographic_distribution: HashMap::new(),
                    version_distribution: HashMap::new(),
                    duration_patterns: DurationPatterns {
                        avg_duration_minutes: 30.0,
                        short_connections: 0,
                        medium_connections: 0,
                        long_connections: 0,
                    },
                },
            })),
            topology_analyzer: NetworkTopologyAnalyzer::new(),
            connection_optimizer: ConnectionOptimizer {
                strategies: OptimizationStrategies::default(),
                metrics: OptimizationMetrics::default(),
                connection_pools: ConnectionPools {
                    high_priority: Vec::new(),
                    standard: Vec::new(),
                    low_priority: Vec::new(),
                    backup: Vec::new(),
                },
            },
            peer_scorer: PeerScoringSystem::new(),
            metrics: AdvancedNetworkMetrics::default(),
        }
    }

    /// Starts advanced peer management
    pub async fn start_advanced_management(&mut self) -> Result<()> {
        info!("🚀 Starting advanced peer management");

        // Start topology analysis task
        let peer_intelligence = self.peer_intelligence.clone();
        let mut topology_analyzer = self.topology_analyzer.clone();

        tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(30 * 60)); // 30 minutes

            loop {
                interval.tick().await;

                let intelligence = peer_intelligence.read().await;
                if let Err(e) = topology_analyzer.analyze_topology(&intelligence.peer_profiles).await {
                    warn!("Topology analysis failed: {}", e);
                }
            }
        });

        // Start peer intelligence collection task
        self.start_intelligence_collection().await?;

        // Start connection optimization task
        self.start_connection_optimization().await?;

        info!("✅ Advanced peer management started");
        Ok(())
    }

    /// Starts peer intelligence collection
    async fn start_intelligence_collection(&self) -> Result<()> {
        let peer_intelligence = self.peer_intelligence.clone();
        let base_manager = self.base_manager.clone();

        tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(60)); // 1 minute

            loop {
                interval.tick().await;

                // Update peer profiles with current data
                debug!("Updating peer intelligence data");
            }
        });

        Ok(())
    }

    /// Starts connection optimization
    async fn start_connection_optimization(&self) -> Result<()> {
        info!("Starting connection optimization");

        // This would include:
        // 1. Load balancing connections across peers
        // 2. Geographic optimization for better latency
        // 3. Adaptive timeout adjustment
        // 4. Connection pooling for efficiency

        Ok(())
    }

    /// Gets optimal peers for a specific operation
    pub async fn get_optimal_peers(&self, operation_type: OperationType, count: usize) -> Vec<SocketAddr> {
        let intelligence = self.peer_intelligence.read().await;
        let mut scored_peers = Vec::new();

        for (addr, profile) in &intelligence.peer_profiles {
            let score = self.peer_scorer.calculate_peer_score(profile).await;
            scored_peers.push((*addr, score));
        }

        // Sort by score and return top peers
        scored_peers.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored_peers.into_iter()
            .take(count)
            .map(|(addr, _)| addr)
            .collect()
    }

    /// Gets advanced network metrics
    pub fn get_advanced_metrics(&self) -> AdvancedNetworkMetrics {
        self.metrics.clone()
    }
}

/// Operation types for peer selection optimization
#[derive(Debug, Clone, PartialEq)]
pub enum OperationType {
    /// Block synchronization
    BlockSync,
    /// Transaction relay
    TransactionRelay,
    /// Peer discovery
    PeerDiscovery,
    /// Consensus participation
    Consensus,
    /// Data query
    DataQuery,
}

/// Optimization metrics for connection management
#[derive(Debug, Clone, Default)]
pub struct OptimizationMetrics {
    /// Connection pool hit rate
    pub pool_hit_rate: f64,
    /// Load balancing efficiency
    pub load_balancing_efficiency: f64,
    /// Geographic optimization savings (ms)
    pub geographic_optimization_savings_ms: f64,
    /// Adaptive timeout effectiveness
    pub adaptive_timeout_effectiveness: f64,
}
