//! Vendored message types for the v2ray/xray management API.
//!
//! Only the handful of messages the agent actually sends is kept:
//! AlterInbound (add/remove user), AddInbound/RemoveInbound and
//! QueryStats. Field numbers follow the upstream .proto definitions;
//! the clients in `handler` and `stats` address the services by their
//! full gRPC paths, so no build-time codegen is needed.

/// Serialized message wrapper (`v2ray.core.common.serial.TypedMessage`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TypedMessage {
    /// Fully qualified message name.
    #[prost(string, tag = "1")]
    pub r#type: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}

/// Wrap a message into a TypedMessage under its upstream type name.
pub fn to_typed_message<M: prost::Message>(type_name: &str, msg: &M) -> TypedMessage {
    TypedMessage {
        r#type: type_name.to_string(),
        value: msg.encode_to_vec(),
    }
}

/// `v2ray.core.common.protocol.User`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(uint32, tag = "1")]
    pub level: u32,
    #[prost(string, tag = "2")]
    pub email: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub account: ::core::option::Option<TypedMessage>,
}

/// `v2ray.core.common.net.PortRange`
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PortRange {
    #[prost(uint32, tag = "1")]
    pub from: u32,
    #[prost(uint32, tag = "2")]
    pub to: u32,
}

/// `v2ray.core.common.net.IPOrDomain`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IpOrDomain {
    #[prost(oneof = "ip_or_domain::Address", tags = "1, 2")]
    pub address: ::core::option::Option<ip_or_domain::Address>,
}

pub mod ip_or_domain {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Address {
        /// IP in binary form.
        #[prost(bytes, tag = "1")]
        Ip(::prost::alloc::vec::Vec<u8>),
        #[prost(string, tag = "2")]
        Domain(::prost::alloc::string::String),
    }
}

pub const VMESS_ACCOUNT_TYPE: &str = "v2ray.core.proxy.vmess.Account";

/// `v2ray.core.proxy.vmess.Account`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VmessAccount {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub alter_id: u32,
}

pub const VLESS_ACCOUNT_TYPE: &str = "v2ray.core.proxy.vless.Account";

/// `v2ray.core.proxy.vless.Account`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VlessAccount {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub flow: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub encryption: ::prost::alloc::string::String,
}

pub const SHADOWSOCKS_ACCOUNT_TYPE: &str = "v2ray.core.proxy.shadowsocks.Account";

/// `v2ray.core.proxy.shadowsocks.Account`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ShadowsocksAccount {
    #[prost(string, tag = "1")]
    pub password: ::prost::alloc::string::String,
    #[prost(enumeration = "CipherType", tag = "2")]
    pub cipher_type: i32,
}

/// `v2ray.core.proxy.shadowsocks.CipherType`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CipherType {
    Unknown = 0,
    Aes128Cfb = 1,
    Aes256Cfb = 2,
    Chacha20 = 3,
    Chacha20Ietf = 4,
    Aes128Gcm = 5,
    Aes256Gcm = 6,
    Chacha20Poly1305 = 7,
    None = 8,
}

pub const RECEIVER_CONFIG_TYPE: &str = "v2ray.core.app.proxyman.ReceiverConfig";

/// `v2ray.core.app.proxyman.ReceiverConfig` (listener side only).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReceiverConfig {
    #[prost(message, optional, tag = "1")]
    pub port_range: ::core::option::Option<PortRange>,
    #[prost(message, optional, tag = "2")]
    pub listen: ::core::option::Option<IpOrDomain>,
}

pub const VMESS_INBOUND_CONFIG_TYPE: &str = "v2ray.core.proxy.vmess.inbound.Config";

/// `v2ray.core.proxy.vmess.inbound.Config` with no pre-seeded users.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct VmessInboundConfig {}

/// `v2ray.core.InboundHandlerConfig`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InboundHandlerConfig {
    #[prost(string, tag = "1")]
    pub tag: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub receiver_settings: ::core::option::Option<TypedMessage>,
    #[prost(message, optional, tag = "3")]
    pub proxy_settings: ::core::option::Option<TypedMessage>,
}

pub const ADD_USER_OPERATION_TYPE: &str = "v2ray.core.app.proxyman.command.AddUserOperation";

/// `v2ray.core.app.proxyman.command.AddUserOperation`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddUserOperation {
    #[prost(message, optional, tag = "1")]
    pub user: ::core::option::Option<User>,
}

pub const REMOVE_USER_OPERATION_TYPE: &str =
    "v2ray.core.app.proxyman.command.RemoveUserOperation";

/// `v2ray.core.app.proxyman.command.RemoveUserOperation`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveUserOperation {
    #[prost(string, tag = "1")]
    pub email: ::prost::alloc::string::String,
}

/// `v2ray.core.app.proxyman.command.AlterInboundRequest`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AlterInboundRequest {
    #[prost(string, tag = "1")]
    pub tag: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub operation: ::core::option::Option<TypedMessage>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AlterInboundResponse {}

/// `v2ray.core.app.proxyman.command.AddInboundRequest`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddInboundRequest {
    #[prost(message, optional, tag = "1")]
    pub inbound: ::core::option::Option<InboundHandlerConfig>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AddInboundResponse {}

/// `v2ray.core.app.proxyman.command.RemoveInboundRequest`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveInboundRequest {
    #[prost(string, tag = "1")]
    pub tag: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct RemoveInboundResponse {}

/// `v2ray.core.app.stats.command.QueryStatsRequest`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryStatsRequest {
    #[prost(string, tag = "1")]
    pub pattern: ::prost::alloc::string::String,
    /// Zero the matched counters atomically with the read.
    #[prost(bool, tag = "2")]
    pub reset: bool,
}

/// `v2ray.core.app.stats.command.Stat`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Stat {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(int64, tag = "2")]
    pub value: i64,
}

/// `v2ray.core.app.stats.command.QueryStatsResponse`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryStatsResponse {
    #[prost(message, repeated, tag = "1")]
    pub stat: ::prost::alloc::vec::Vec<Stat>,
}
