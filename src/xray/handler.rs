//! User add/remove against one inbound listener, via HandlerService.

use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

use super::proto;
use crate::agent::InboundManager;
use crate::error::{AgentError, Result};
use crate::logger::log;
use crate::model::Account;

const ALTER_INBOUND_PATH: &str = "/v2ray.core.app.proxyman.command.HandlerService/AlterInbound";
const ADD_INBOUND_PATH: &str = "/v2ray.core.app.proxyman.command.HandlerService/AddInbound";
const REMOVE_INBOUND_PATH: &str = "/v2ray.core.app.proxyman.command.HandlerService/RemoveInbound";

/// Protocol family of the inbound a manager drives. Selects the
/// credential payload, not the target: the tag does that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Vmess,
    Vless,
    Shadowsocks,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Vmess => "vmess",
            Protocol::Vless => "vless",
            Protocol::Shadowsocks => "shadowsocks",
        }
    }
}

fn cipher_type(name: &str) -> Option<proto::CipherType> {
    match name.to_lowercase().as_str() {
        "aes-128-cfb" => Some(proto::CipherType::Aes128Cfb),
        "aes-256-cfb" => Some(proto::CipherType::Aes256Cfb),
        "chacha20" => Some(proto::CipherType::Chacha20),
        "chacha20-ietf" => Some(proto::CipherType::Chacha20Ietf),
        "aes-128-gcm" => Some(proto::CipherType::Aes128Gcm),
        "aes-256-gcm" => Some(proto::CipherType::Aes256Gcm),
        "chacha20-poly1305" | "chacha20-ietf-poly1305" => Some(proto::CipherType::Chacha20Poly1305),
        "none" => Some(proto::CipherType::None),
        _ => None,
    }
}

/// Management client bound to one inbound tag for the agent's lifetime.
///
/// Each call is a single blocking RPC; transport errors surface to the
/// caller unmodified and there is no local retry.
#[derive(Clone)]
pub struct HandlerServiceClient {
    grpc: Grpc<Channel>,
    tag: String,
    protocol: Protocol,
}

impl HandlerServiceClient {
    pub fn new(channel: Channel, tag: String, protocol: Protocol) -> Self {
        Self {
            grpc: Grpc::new(channel),
            tag,
            protocol,
        }
    }

    /// Translate an account into this inbound's credential payload.
    fn build_user(&self, account: &Account) -> Result<proto::User> {
        let payload = match self.protocol {
            Protocol::Vmess => proto::to_typed_message(
                proto::VMESS_ACCOUNT_TYPE,
                &proto::VmessAccount {
                    id: account.uuid.clone(),
                    alter_id: 0,
                },
            ),
            Protocol::Vless => proto::to_typed_message(
                proto::VLESS_ACCOUNT_TYPE,
                &proto::VlessAccount {
                    id: account.uuid.clone(),
                    flow: String::new(),
                    encryption: "none".to_string(),
                },
            ),
            Protocol::Shadowsocks => {
                let secret = account.secret.as_deref().ok_or_else(|| {
                    AgentError::Config(format!("account {} has no password", account.email))
                })?;
                let cipher_name = account.cipher.as_deref().unwrap_or_default();
                let cipher = cipher_type(cipher_name).ok_or_else(|| {
                    AgentError::Config(format!(
                        "account {} has unsupported cipher '{}'",
                        account.email, cipher_name
                    ))
                })?;
                proto::to_typed_message(
                    proto::SHADOWSOCKS_ACCOUNT_TYPE,
                    &proto::ShadowsocksAccount {
                        password: secret.to_string(),
                        cipher_type: cipher as i32,
                    },
                )
            }
        };

        Ok(proto::User {
            level: 0,
            email: account.email.clone(),
            account: Some(payload),
        })
    }

    async fn alter_inbound(&self, operation: proto::TypedMessage) -> Result<()> {
        let request = proto::AlterInboundRequest {
            tag: self.tag.clone(),
            operation: Some(operation),
        };
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("service not ready: {}", e)))?;
        let codec: tonic::codec::ProstCodec<proto::AlterInboundRequest, proto::AlterInboundResponse> =
            tonic::codec::ProstCodec::default();
        grpc.unary(
            tonic::Request::new(request),
            PathAndQuery::from_static(ALTER_INBOUND_PATH),
            codec,
        )
        .await?;
        Ok(())
    }

    /// Provision the vmess inbound listener itself, for proxy configs
    /// that do not already declare it.
    pub async fn add_vmess_inbound(&self, port: u16, bind: &str) -> Result<()> {
        let listen = match bind.parse::<std::net::IpAddr>() {
            Ok(std::net::IpAddr::V4(v4)) => proto::ip_or_domain::Address::Ip(v4.octets().to_vec()),
            Ok(std::net::IpAddr::V6(v6)) => proto::ip_or_domain::Address::Ip(v6.octets().to_vec()),
            Err(_) => proto::ip_or_domain::Address::Domain(bind.to_string()),
        };
        let request = proto::AddInboundRequest {
            inbound: Some(proto::InboundHandlerConfig {
                tag: self.tag.clone(),
                receiver_settings: Some(proto::to_typed_message(
                    proto::RECEIVER_CONFIG_TYPE,
                    &proto::ReceiverConfig {
                        port_range: Some(proto::PortRange {
                            from: port as u32,
                            to: port as u32,
                        }),
                        listen: Some(proto::IpOrDomain {
                            address: Some(listen),
                        }),
                    },
                )),
                proxy_settings: Some(proto::to_typed_message(
                    proto::VMESS_INBOUND_CONFIG_TYPE,
                    &proto::VmessInboundConfig {},
                )),
            }),
        };
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("service not ready: {}", e)))?;
        let codec: tonic::codec::ProstCodec<proto::AddInboundRequest, proto::AddInboundResponse> =
            tonic::codec::ProstCodec::default();
        grpc.unary(
            tonic::Request::new(request),
            PathAndQuery::from_static(ADD_INBOUND_PATH),
            codec,
        )
        .await?;
        log::info!(tag = %self.tag, port = port, bind = %bind, "Inbound listener provisioned");
        Ok(())
    }

    /// Remove this manager's inbound listener entirely.
    pub async fn remove_inbound(&self) -> Result<()> {
        let request = proto::RemoveInboundRequest {
            tag: self.tag.clone(),
        };
        let mut grpc = self.grpc.clone();
        grpc.ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("service not ready: {}", e)))?;
        let codec: tonic::codec::ProstCodec<proto::RemoveInboundRequest, proto::RemoveInboundResponse> =
            tonic::codec::ProstCodec::default();
        grpc.unary(
            tonic::Request::new(request),
            PathAndQuery::from_static(REMOVE_INBOUND_PATH),
            codec,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl InboundManager for HandlerServiceClient {
    fn tag(&self) -> &str {
        &self.tag
    }

    async fn add_user(&self, account: &Account) -> Result<()> {
        let user = self.build_user(account)?;
        let operation = proto::to_typed_message(
            proto::ADD_USER_OPERATION_TYPE,
            &proto::AddUserOperation { user: Some(user) },
        );
        self.alter_inbound(operation).await
    }

    async fn remove_user(&self, email: &str) -> Result<()> {
        let operation = proto::to_typed_message(
            proto::REMOVE_USER_OPERATION_TYPE,
            &proto::RemoveUserOperation {
                email: email.to_string(),
            },
        );
        self.alter_inbound(operation).await
    }
}
