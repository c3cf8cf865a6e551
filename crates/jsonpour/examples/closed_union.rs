//! Decodes a chat-completion style message whose `content` is a closed
//! union and whose `tool_calls` may arrive as a single object or a list.
//!
//! The relevant part of the schema looks roughly as follows:
//!
//! ```text
//! {
//!   "role":       string,
//!   "content":    string | [ { "type": "text", "text": string } ] | null,
//!   "tool_calls": { "name": string, "arguments": object }
//!               | [ { "name": string, "arguments": object } ]
//! }
//! ```
//!
//! `content` is handled with a variable decode: the leading byte decides
//! whether the caller reads a string or walks an array of parts.
//! `tool_calls` is handled with an arrayable decode so the single-object
//! shortcut some providers emit lands in the same `Vec` as the list form.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonpour --example closed_union
//! ```

use jsonpour::{
    ArrayFn, DecodeError, Decoder, ObjectFn, UnmarshalArrayable, UnmarshalObject,
    UnmarshalVariable, Value,
};

#[derive(Debug, Default)]
enum Content {
    #[default]
    Empty,
    Text(String),
    Parts(Vec<String>),
}

impl UnmarshalVariable for Content {
    fn unmarshal_variable(&mut self, dec: &mut Decoder<'_>, leading: u8) -> Result<(), DecodeError> {
        match leading {
            b'"' => {
                let mut text = String::new();
                dec.string(&mut text)?;
                *self = Content::Text(text);
            }
            b'[' => {
                let mut parts = Vec::new();
                dec.array(&mut ArrayFn::new(|dec| {
                    let mut text = String::new();
                    dec.object(&mut ObjectFn::new(|dec, key| match key {
                        "text" => dec.string(&mut text),
                        _ => Ok(()),
                    }))?;
                    parts.push(text);
                    Ok(())
                }))?;
                *self = Content::Parts(parts);
            }
            _ => return Err(DecodeError::custom("content must be a string or a list of parts")),
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ToolCall {
    name: String,
    arguments: Value,
}

impl UnmarshalObject for ToolCall {
    fn unmarshal_field(&mut self, dec: &mut Decoder<'_>, key: &str) -> Result<(), DecodeError> {
        match key {
            "name" => dec.string(&mut self.name),
            "arguments" => dec.variable(&mut self.arguments),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
struct ToolCalls(Vec<ToolCall>);

impl UnmarshalArrayable for ToolCalls {
    fn unmarshal_array_element(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError> {
        let mut call = ToolCall::default();
        dec.object(&mut call)?;
        self.0.push(call);
        Ok(())
    }

    fn unmarshal_bare(&mut self, dec: &mut Decoder<'_>) -> Result<(), DecodeError> {
        self.unmarshal_array_element(dec)
    }
}

#[derive(Debug, Default)]
struct Message {
    role: String,
    content: Content,
    tool_calls: ToolCalls,
}

impl UnmarshalObject for Message {
    fn unmarshal_field(&mut self, dec: &mut Decoder<'_>, key: &str) -> Result<(), DecodeError> {
        match key {
            "role" => dec.string(&mut self.role),
            "content" => dec.variable(&mut self.content),
            "tool_calls" => dec.arrayable(&mut self.tool_calls),
            _ => Ok(()),
        }
    }
}

const MESSAGES: [&str; 3] = [
    r#"{"role":"assistant","content":"Looking that up.","tool_calls":{"name":"search","arguments":{"q":"rust"}}}"#,
    r#"{"role":"assistant","content":[{"type":"text","text":"Two"},{"type":"text","text":"calls"}],
        "tool_calls":[{"name":"open","arguments":{"id":3}},{"name":"close","arguments":{}}]}"#,
    r#"{"role":"assistant","content":null,"tool_calls":"not-a-call"}"#,
];

fn main() {
    for raw in MESSAGES {
        let mut msg = Message::default();
        let mut dec = Decoder::from_slice(raw.as_bytes());
        if let Err(err) = dec.decode_object(&mut msg) {
            println!("rejected: {err}");
            continue;
        }
        match &msg.content {
            Content::Empty => println!("{}: (no content)", msg.role),
            Content::Text(text) => println!("{}: {text}", msg.role),
            Content::Parts(parts) => println!("{}: {}", msg.role, parts.join(" ")),
        }
        for call in &msg.tool_calls.0 {
            println!("  call {}({:?})", call.name, call.arguments);
        }
        if let Some(err) = dec.take_error() {
            println!("  skipped a field: {err}");
        }
    }
}
