//! The component catalog.
//!
//! One static table drives both text detection (keywords) and layout placement
//! (default tiers). Every other lookup in the crate goes through this module so the
//! two never drift apart.

use crate::spec::Tier;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Broad family of a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    External,
    Security,
    Network,
    Compute,
    Data,
    Telecom,
    Observability,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::External => "external",
            Category::Security => "security",
            Category::Network => "network",
            Category::Compute => "compute",
            Category::Data => "data",
            Category::Telecom => "telecom",
            Category::Observability => "observability",
        };
        f.write_str(name)
    }
}

/// A single catalog row.
#[derive(Debug)]
pub struct ComponentDef {
    pub component_type: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub default_tier: Tier,
    /// English and Korean keywords, already lower-case.
    pub keywords: &'static [&'static str],
}

/// Declares the catalog table. Row order is detection priority: a type whose keywords
/// contain another type's keyword (e.g. "웹방화벽" contains "방화벽") must come first.
macro_rules! define_components {
    ( $( ($type_name:expr, $label:expr, $category:ident, $tier:ident, [ $( $kw:expr ),* $(,)? ]) ),* $(,)? ) => {
        /// Every known component type, in detection priority order.
        pub static CATALOG: &[ComponentDef] = &[
            $(
                ComponentDef {
                    component_type: $type_name,
                    label: $label,
                    category: Category::$category,
                    default_tier: Tier::$tier,
                    keywords: &[ $( $kw ),* ],
                },
            )*
        ];
    };
}

define_components! {
    // Security
    ("waf", "WAF", Security, Dmz, ["waf", "web application firewall", "웹방화벽", "웹 방화벽"]),
    ("firewall", "Firewall", Security, Dmz, ["firewall", "방화벽", "utm"]),
    ("ids-ips", "IDS/IPS", Security, Dmz, ["ids/ips", "intrusion", "침입탐지", "침입 탐지", "침입방지", "침입 방지"]),
    ("ddos-protection", "DDoS Protection", Security, Dmz, ["ddos", "디도스"]),
    ("vpn-gateway", "VPN Gateway", Security, Dmz, ["vpn", "가상사설망"]),

    // Edge networking
    ("api-gateway", "API Gateway", Network, Dmz, ["api gateway", "api-gateway", "api 게이트웨이", "api게이트웨이"]),
    ("nat-gateway", "NAT Gateway", Network, Dmz, ["nat gateway", "nat-gateway", "nat 게이트웨이"]),
    ("load-balancer", "Load Balancer", Network, Dmz, ["load balancer", "load-balancer", "loadbalancer", "로드밸런서", "로드 밸런서", "부하분산"]),
    ("proxy", "Proxy", Network, Dmz, ["proxy", "프록시"]),
    ("router", "Router", Network, Dmz, ["router", "라우터"]),
    ("dns", "DNS", Network, External, ["dns", "도메인 네임"]),

    // Outside world
    ("cdn", "CDN", External, External, ["cdn", "content delivery", "콘텐츠 전송"]),
    ("internet", "Internet", External, External, ["internet", "인터넷"]),
    ("user", "User", External, External, ["user", "client", "사용자", "클라이언트"]),
    ("mobile", "Mobile Device", External, External, ["mobile", "smartphone", "모바일", "스마트폰", "단말"]),

    // Telecom
    ("base-station", "Base Station", Telecom, External, ["base station", "base-station", "enodeb", "gnodeb", "기지국"]),
    ("switch", "Switch", Network, Internal, ["switch", "스위치"]),

    // Compute
    ("web-server", "Web Server", Compute, Internal, ["web server", "web-server", "webserver", "웹서버", "웹 서버", "nginx", "apache"]),
    ("app-server", "Application Server", Compute, Internal, ["app server", "app-server", "application server", "앱서버", "앱 서버", "애플리케이션 서버", "tomcat"]),
    ("kubernetes", "Kubernetes Cluster", Compute, Internal, ["kubernetes", "k8s", "쿠버네티스"]),
    ("container", "Container", Compute, Internal, ["container", "docker", "컨테이너", "도커"]),
    ("message-queue", "Message Queue", Compute, Internal, ["message queue", "kafka", "rabbitmq", "메시지 큐", "메시지큐"]),
    ("auth-server", "Auth Server", Security, Internal, ["auth server", "authentication", "ldap", "인증 서버", "인증서버"]),

    // Observability
    ("monitoring", "Monitoring", Observability, Internal, ["monitoring", "prometheus", "grafana", "모니터링"]),
    ("siem", "SIEM", Observability, Internal, ["siem", "보안관제", "보안 관제"]),

    // Data
    ("cache", "Cache", Data, Data, ["cache", "redis", "memcached", "캐시"]),
    ("db-server", "Database", Data, Data, ["database", "db server", "db-server", "mysql", "postgres", "mongodb", "oracle", "데이터베이스", "디비", "db"]),
    ("storage", "Storage", Data, Data, ["storage", "object storage", "스토리지", "저장소"]),
    ("backup", "Backup", Data, Data, ["backup", "백업"]),
}

static INDEX: LazyLock<AHashMap<&'static str, &'static ComponentDef>> =
    LazyLock::new(|| CATALOG.iter().map(|def| (def.component_type, def)).collect());

/// Looks up a component type by its exact name.
pub fn lookup(component_type: &str) -> Option<&'static ComponentDef> {
    INDEX.get(component_type).copied()
}

pub fn is_known_type(component_type: &str) -> bool {
    INDEX.contains_key(component_type)
}

/// Default tier of a component type; unknown types land in `Internal`.
pub fn default_tier(component_type: &str) -> Tier {
    lookup(component_type)
        .map(|def| def.default_tier)
        .unwrap_or(Tier::Internal)
}

/// Display label for a component type, falling back to the type name itself.
pub fn label_for(component_type: &str) -> String {
    lookup(component_type)
        .map(|def| def.label.to_string())
        .unwrap_or_else(|| component_type.to_string())
}
