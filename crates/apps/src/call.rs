use serde::{Deserialize, Serialize};

use crate::{context::Context, expand::Expand};

/// The kind of invocation a call represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    /// A plain action the app executes.
    #[default]
    Submit,
    /// A request for the app to produce a form definition.
    Form,
}

/// A named invocation target: where to go, on whose behalf, and what the
/// destination may see.
///
/// Calls are plain data. The same shape is dispatched to an app's endpoint
/// and parked as the resume payload of a link handshake, so it must survive
/// serialization without loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Call {
    pub path: String,
    pub context: Context,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Expand>,
    #[serde(rename = "type")]
    pub call_type: CallType,
}

/// Renderable outcome of dispatching a call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallResponse {
    /// Markdown summary suitable for delivery in a message.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{app::AppId, expand::ExpandLevel},
    };

    #[test]
    fn call_round_trips_losslessly() {
        let mut context = Context {
            app_id: AppId::from("acme"),
            acting_user_id: "u1".into(),
            channel_id: "ch1".into(),
            ..Default::default()
        };
        context.set_prop("thread", "p9");
        let call = Call {
            path: "/hello/send".into(),
            context,
            expand: Some(Expand {
                acting_user: ExpandLevel::Summary,
                ..Default::default()
            }),
            call_type: CallType::Form,
        };

        let bytes = serde_json::to_vec(&call).unwrap();
        let back: Call = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            serde_json::to_value(&back).unwrap(),
            serde_json::to_value(&call).unwrap()
        );
    }
}
