// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

pub const WEBHOOK_ACK_MESSAGE: &str = "Webhook received";

/// Webhook 确认响应
#[derive(Debug, Deserialize, Serialize)]
pub struct WebhookAckDto {
    pub message: String,
}

impl Default for WebhookAckDto {
    fn default() -> Self {
        Self {
            message: WEBHOOK_ACK_MESSAGE.to_string(),
        }
    }
}
