//! Incremental schema scanner
//!
//! A pushdown machine over JSON bytes. Each call to [`scan`] runs the full
//! candidate against a [`SchemaNode`] and reports whether it is a valid
//! prefix, a complete value, or unsalvageable. Completion is detected at the
//! byte where the root value closes, so callers learn the exact offset even
//! when the backend has already produced trailing noise.

use crate::core::schema::node::SchemaNode;
use crate::core::types::Validation;

/// Check a candidate against a schema
///
/// Never fails: malformed candidates come back as
/// `is_prefix_valid == false`. A complete verdict always carries the byte
/// offset where the value ends, which may be less than `candidate.len()`.
pub fn scan(root: &SchemaNode, candidate: &str) -> Validation {
    let mut stack: Vec<Frame<'_>> = vec![Frame::Value(root)];

    for (offset, byte) in candidate.bytes().enumerate() {
        match step(&mut stack, byte, offset) {
            Step::Accepted => {}
            Step::Rejected => return Validation::rejected(),
            Step::Finished(end) => return Validation::complete_at(end),
        }
    }

    // Ran out of input with the value still open. Numbers and enums that
    // are only missing their terminator land here too: "1" could still
    // grow into "12", so end of input alone never completes them.
    Validation::incomplete()
}

static ANY: SchemaNode = SchemaNode::Any;

enum Step {
    Accepted,
    Rejected,
    Finished(usize),
}

enum Frame<'a> {
    /// Expecting the first byte of a value of this schema
    Value(&'a SchemaNode),
    Object(ObjectFrame<'a>),
    Array(ArrayFrame<'a>),
    Str(StringFrame),
    Number(NumberFrame),
    Literal(LiteralFrame),
    Enum(EnumFrame<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectSyntax {
    ExpectKeyOrEnd,
    ExpectKey,
    InKey,
    ExpectColon,
    ExpectValue,
    ExpectCommaOrEnd,
}

struct ObjectFrame<'a> {
    /// Declared properties, or `None` for a freeform object
    properties: Option<&'a [(String, SchemaNode)]>,
    syntax: ObjectSyntax,
    /// Raw key bytes as they stream in; declared names are matched
    /// byte-for-byte so multibyte UTF-8 names work
    key_buffer: Vec<u8>,
    used_keys: Vec<Vec<u8>>,
    key_escape: EscapeState,
    missing_required: Vec<&'a str>,
}

impl<'a> ObjectFrame<'a> {
    fn new(properties: Option<&'a [(String, SchemaNode)]>, required: &'a [String]) -> Self {
        Self {
            properties,
            syntax: ObjectSyntax::ExpectKeyOrEnd,
            key_buffer: Vec::new(),
            used_keys: Vec::new(),
            key_escape: EscapeState::None,
            missing_required: required.iter().map(String::as_str).collect(),
        }
    }

    fn key_prefix_viable(&self, extended: &[u8]) -> bool {
        match self.properties {
            None => true,
            Some(props) => props
                .iter()
                .any(|(name, _)| name.as_bytes().starts_with(extended)),
        }
    }

    fn key_allowed(&self, key: &[u8]) -> bool {
        match self.properties {
            None => true,
            Some(props) => props.iter().any(|(name, _)| name.as_bytes() == key),
        }
    }

    fn value_node(&self) -> &'a SchemaNode {
        match self.properties {
            None => &ANY,
            Some(props) => props
                .iter()
                .find(|(name, _)| name.as_bytes() == self.key_buffer.as_slice())
                .map(|(_, node)| node)
                .unwrap_or(&ANY),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArraySyntax {
    ExpectValueOrEnd,
    ExpectValue,
    ExpectCommaOrEnd,
}

struct ArrayFrame<'a> {
    items: &'a SchemaNode,
    syntax: ArraySyntax,
    count: usize,
    min_items: Option<usize>,
    max_items: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    None,
    Started,
    /// Hex digits still expected after `\u`
    Unicode(u8),
}

struct StringFrame {
    min_length: Option<usize>,
    max_length: Option<usize>,
    chars: usize,
    escape: EscapeState,
}

impl StringFrame {
    fn new(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        Self {
            min_length,
            max_length,
            chars: 0,
            escape: EscapeState::None,
        }
    }

    fn at_max(&self) -> bool {
        self.max_length.is_some_and(|max| self.chars >= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumState {
    MinusSeen,
    IntZero,
    IntDigits,
    FracStart,
    FracDigits,
    ExpStart,
    ExpSign,
    ExpDigits,
}

struct NumberFrame {
    integer: bool,
    state: NumState,
}

impl NumberFrame {
    fn start(byte: u8, integer: bool) -> Option<Self> {
        let state = match byte {
            b'-' => NumState::MinusSeen,
            b'0' => NumState::IntZero,
            b'1'..=b'9' => NumState::IntDigits,
            _ => return None,
        };
        Some(Self { integer, state })
    }

    /// Whether a terminator byte may end the number here
    fn terminatable(&self) -> bool {
        matches!(
            self.state,
            NumState::IntZero | NumState::IntDigits | NumState::FracDigits | NumState::ExpDigits
        )
    }

    fn advance(&mut self, byte: u8) -> bool {
        use NumState::*;
        let next = match (self.state, byte) {
            (MinusSeen, b'0') => IntZero,
            (MinusSeen, b'1'..=b'9') => IntDigits,
            // a second integer digit after a leading zero is not JSON
            (IntZero, b'.') if !self.integer => FracStart,
            (IntZero, b'e' | b'E') if !self.integer => ExpStart,
            (IntDigits, b'0'..=b'9') => IntDigits,
            (IntDigits, b'.') if !self.integer => FracStart,
            (IntDigits, b'e' | b'E') if !self.integer => ExpStart,
            (FracStart, b'0'..=b'9') => FracDigits,
            (FracDigits, b'0'..=b'9') => FracDigits,
            (FracDigits, b'e' | b'E') => ExpStart,
            (ExpStart, b'+' | b'-') => ExpSign,
            (ExpStart, b'0'..=b'9') => ExpDigits,
            (ExpSign, b'0'..=b'9') => ExpDigits,
            (ExpDigits, b'0'..=b'9') => ExpDigits,
            _ => return false,
        };
        self.state = next;
        true
    }
}

struct LiteralFrame {
    literal: &'static [u8],
    pos: usize,
}

struct EnumFrame<'a> {
    /// Serialized literals still consistent with the input
    viable: Vec<&'a [u8]>,
    cursor: usize,
}

impl EnumFrame<'_> {
    fn fully_matched(&self) -> bool {
        self.viable.iter().any(|c| c.len() == self.cursor)
    }

    fn has_longer(&self) -> bool {
        self.viable.iter().any(|c| c.len() > self.cursor)
    }
}

enum Push {
    Accepted,
    Rejected,
    /// The value completed on its single first byte; nothing was pushed
    Completed,
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_terminator(byte: u8) -> bool {
    is_whitespace(byte) || matches!(byte, b',' | b'}' | b']')
}

/// Open the frame for a value whose first byte just arrived
fn push_value<'a>(stack: &mut Vec<Frame<'a>>, node: &'a SchemaNode, byte: u8) -> Push {
    match node {
        SchemaNode::Any => {
            let dispatched = match byte {
                b'"' => Frame::Str(StringFrame::new(None, None)),
                b'-' | b'0'..=b'9' => match NumberFrame::start(byte, false) {
                    Some(frame) => Frame::Number(frame),
                    None => return Push::Rejected,
                },
                b't' => Frame::Literal(LiteralFrame {
                    literal: b"true",
                    pos: 1,
                }),
                b'f' => Frame::Literal(LiteralFrame {
                    literal: b"false",
                    pos: 1,
                }),
                b'n' => Frame::Literal(LiteralFrame {
                    literal: b"null",
                    pos: 1,
                }),
                b'{' => Frame::Object(ObjectFrame::new(None, &[])),
                b'[' => Frame::Array(ArrayFrame {
                    items: &ANY,
                    syntax: ArraySyntax::ExpectValueOrEnd,
                    count: 0,
                    min_items: None,
                    max_items: None,
                }),
                _ => return Push::Rejected,
            };
            stack.push(dispatched);
            Push::Accepted
        }
        SchemaNode::String {
            min_length,
            max_length,
        } => {
            if byte != b'"' {
                return Push::Rejected;
            }
            stack.push(Frame::Str(StringFrame::new(*min_length, *max_length)));
            Push::Accepted
        }
        SchemaNode::Number { integer } => match NumberFrame::start(byte, *integer) {
            Some(frame) => {
                stack.push(Frame::Number(frame));
                Push::Accepted
            }
            None => Push::Rejected,
        },
        SchemaNode::Boolean => {
            let literal: &'static [u8] = match byte {
                b't' => b"true",
                b'f' => b"false",
                _ => return Push::Rejected,
            };
            stack.push(Frame::Literal(LiteralFrame { literal, pos: 1 }));
            Push::Accepted
        }
        SchemaNode::Null => {
            if byte != b'n' {
                return Push::Rejected;
            }
            stack.push(Frame::Literal(LiteralFrame {
                literal: b"null",
                pos: 1,
            }));
            Push::Accepted
        }
        SchemaNode::Object {
            properties,
            required,
        } => {
            if byte != b'{' {
                return Push::Rejected;
            }
            stack.push(Frame::Object(ObjectFrame::new(
                properties.as_deref(),
                required,
            )));
            Push::Accepted
        }
        SchemaNode::Array {
            items,
            min_items,
            max_items,
        } => {
            if byte != b'[' {
                return Push::Rejected;
            }
            stack.push(Frame::Array(ArrayFrame {
                items,
                syntax: ArraySyntax::ExpectValueOrEnd,
                count: 0,
                min_items: *min_items,
                max_items: *max_items,
            }));
            Push::Accepted
        }
        SchemaNode::Enum { literals } => {
            let viable: Vec<&[u8]> = literals
                .iter()
                .map(String::as_bytes)
                .filter(|c| c.first() == Some(&byte))
                .collect();
            if viable.is_empty() {
                return Push::Rejected;
            }
            let frame = EnumFrame { viable, cursor: 1 };
            if frame.fully_matched() && !frame.has_longer() {
                return Push::Completed;
            }
            stack.push(Frame::Enum(frame));
            Push::Accepted
        }
    }
}

/// Feed one byte through the machine
///
/// Loops so that a popped frame can hand a terminator byte back to its
/// parent, the way a `}` both ends a number and closes its object.
fn step(stack: &mut Vec<Frame<'_>>, byte: u8, offset: usize) -> Step {
    loop {
        let depth = stack.len();
        let Some(top) = stack.last_mut() else {
            return Step::Rejected;
        };

        match top {
            Frame::Value(node) => {
                if is_whitespace(byte) {
                    return Step::Accepted;
                }
                let node = *node;
                stack.pop();
                return match push_value(stack, node, byte) {
                    Push::Accepted => Step::Accepted,
                    Push::Rejected => Step::Rejected,
                    Push::Completed => {
                        if stack.is_empty() {
                            Step::Finished(offset + 1)
                        } else {
                            Step::Accepted
                        }
                    }
                };
            }

            Frame::Object(frame) => match frame.syntax {
                ObjectSyntax::ExpectKeyOrEnd => {
                    if is_whitespace(byte) {
                        return Step::Accepted;
                    }
                    if byte == b'"' {
                        frame.syntax = ObjectSyntax::InKey;
                        frame.key_buffer.clear();
                        frame.key_escape = EscapeState::None;
                        return Step::Accepted;
                    }
                    if byte == b'}' {
                        if !frame.missing_required.is_empty() {
                            return Step::Rejected;
                        }
                        stack.pop();
                        return if stack.is_empty() {
                            Step::Finished(offset + 1)
                        } else {
                            Step::Accepted
                        };
                    }
                    return Step::Rejected;
                }
                ObjectSyntax::ExpectKey => {
                    if is_whitespace(byte) {
                        return Step::Accepted;
                    }
                    if byte == b'"' {
                        frame.syntax = ObjectSyntax::InKey;
                        frame.key_buffer.clear();
                        frame.key_escape = EscapeState::None;
                        return Step::Accepted;
                    }
                    return Step::Rejected;
                }
                ObjectSyntax::InKey => {
                    match frame.key_escape {
                        EscapeState::Started => {
                            if matches!(
                                byte,
                                b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't'
                            ) {
                                frame.key_escape = EscapeState::None;
                                frame.key_buffer.push(byte);
                                return Step::Accepted;
                            }
                            if byte == b'u' {
                                frame.key_escape = EscapeState::Unicode(4);
                                frame.key_buffer.push(b'u');
                                return Step::Accepted;
                            }
                            return Step::Rejected;
                        }
                        EscapeState::Unicode(left) => {
                            if byte.is_ascii_hexdigit() {
                                frame.key_escape = if left == 1 {
                                    EscapeState::None
                                } else {
                                    EscapeState::Unicode(left - 1)
                                };
                                frame.key_buffer.push(byte);
                                return Step::Accepted;
                            }
                            return Step::Rejected;
                        }
                        EscapeState::None => {}
                    }
                    if byte == b'"' {
                        if frame.key_allowed(&frame.key_buffer)
                            && !frame.used_keys.contains(&frame.key_buffer)
                        {
                            frame.syntax = ObjectSyntax::ExpectColon;
                            return Step::Accepted;
                        }
                        return Step::Rejected;
                    }
                    if byte == b'\\' {
                        // Only a freeform key can carry escapes; no declared
                        // name contains a raw backslash
                        if frame.properties.is_none() {
                            frame.key_escape = EscapeState::Started;
                            frame.key_buffer.push(b'\\');
                            return Step::Accepted;
                        }
                        return Step::Rejected;
                    }
                    if byte < 0x20 {
                        return Step::Rejected;
                    }
                    frame.key_buffer.push(byte);
                    if frame.key_prefix_viable(&frame.key_buffer) {
                        return Step::Accepted;
                    }
                    // A rejection ends the scan, so the stray byte can stay
                    // in the buffer
                    return Step::Rejected;
                }
                ObjectSyntax::ExpectColon => {
                    if is_whitespace(byte) {
                        return Step::Accepted;
                    }
                    if byte == b':' {
                        let key = frame.key_buffer.clone();
                        frame
                            .missing_required
                            .retain(|name| name.as_bytes() != key.as_slice());
                        frame.used_keys.push(key);
                        frame.syntax = ObjectSyntax::ExpectValue;
                        return Step::Accepted;
                    }
                    return Step::Rejected;
                }
                ObjectSyntax::ExpectValue => {
                    if is_whitespace(byte) {
                        return Step::Accepted;
                    }
                    let node = frame.value_node();
                    frame.syntax = ObjectSyntax::ExpectCommaOrEnd;
                    return match push_value(stack, node, byte) {
                        Push::Accepted | Push::Completed => Step::Accepted,
                        Push::Rejected => Step::Rejected,
                    };
                }
                ObjectSyntax::ExpectCommaOrEnd => {
                    if is_whitespace(byte) {
                        return Step::Accepted;
                    }
                    if byte == b',' {
                        frame.syntax = ObjectSyntax::ExpectKey;
                        return Step::Accepted;
                    }
                    if byte == b'}' {
                        if !frame.missing_required.is_empty() {
                            return Step::Rejected;
                        }
                        stack.pop();
                        return if stack.is_empty() {
                            Step::Finished(offset + 1)
                        } else {
                            Step::Accepted
                        };
                    }
                    return Step::Rejected;
                }
            },

            Frame::Array(frame) => match frame.syntax {
                ArraySyntax::ExpectValueOrEnd | ArraySyntax::ExpectValue => {
                    if is_whitespace(byte) {
                        return Step::Accepted;
                    }
                    if byte == b']' && frame.syntax == ArraySyntax::ExpectValueOrEnd {
                        if frame.min_items.is_some_and(|min| frame.count < min) {
                            return Step::Rejected;
                        }
                        stack.pop();
                        return if stack.is_empty() {
                            Step::Finished(offset + 1)
                        } else {
                            Step::Accepted
                        };
                    }
                    if frame.max_items.is_some_and(|max| frame.count >= max) {
                        return Step::Rejected;
                    }
                    frame.syntax = ArraySyntax::ExpectCommaOrEnd;
                    frame.count += 1;
                    let items = frame.items;
                    return match push_value(stack, items, byte) {
                        Push::Accepted | Push::Completed => Step::Accepted,
                        Push::Rejected => Step::Rejected,
                    };
                }
                ArraySyntax::ExpectCommaOrEnd => {
                    if is_whitespace(byte) {
                        return Step::Accepted;
                    }
                    if byte == b',' {
                        if frame.max_items.is_some_and(|max| frame.count >= max) {
                            return Step::Rejected;
                        }
                        frame.syntax = ArraySyntax::ExpectValue;
                        return Step::Accepted;
                    }
                    if byte == b']' {
                        if frame.min_items.is_some_and(|min| frame.count < min) {
                            return Step::Rejected;
                        }
                        stack.pop();
                        return if stack.is_empty() {
                            Step::Finished(offset + 1)
                        } else {
                            Step::Accepted
                        };
                    }
                    return Step::Rejected;
                }
            },

            Frame::Str(frame) => {
                match frame.escape {
                    EscapeState::Started => {
                        if matches!(byte, b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') {
                            if frame.at_max() {
                                return Step::Rejected;
                            }
                            frame.chars += 1;
                            frame.escape = EscapeState::None;
                            return Step::Accepted;
                        }
                        if byte == b'u' {
                            frame.escape = EscapeState::Unicode(4);
                            return Step::Accepted;
                        }
                        return Step::Rejected;
                    }
                    EscapeState::Unicode(left) => {
                        if !byte.is_ascii_hexdigit() {
                            return Step::Rejected;
                        }
                        if left == 1 {
                            if frame.at_max() {
                                return Step::Rejected;
                            }
                            frame.chars += 1;
                            frame.escape = EscapeState::None;
                        } else {
                            frame.escape = EscapeState::Unicode(left - 1);
                        }
                        return Step::Accepted;
                    }
                    EscapeState::None => {}
                }
                if byte == b'"' {
                    if frame.min_length.is_some_and(|min| frame.chars < min) {
                        return Step::Rejected;
                    }
                    stack.pop();
                    return if stack.is_empty() {
                        Step::Finished(offset + 1)
                    } else {
                        Step::Accepted
                    };
                }
                if byte == b'\\' {
                    frame.escape = EscapeState::Started;
                    return Step::Accepted;
                }
                if byte < 0x20 {
                    return Step::Rejected;
                }
                // UTF-8 continuation bytes extend the current char
                if (0x80..=0xBF).contains(&byte) {
                    return Step::Accepted;
                }
                if frame.at_max() {
                    return Step::Rejected;
                }
                frame.chars += 1;
                return Step::Accepted;
            }

            Frame::Number(frame) => {
                if is_terminator(byte) && frame.terminatable() {
                    stack.pop();
                    if stack.is_empty() {
                        // the terminator itself is not part of the value
                        return Step::Finished(offset);
                    }
                    continue;
                }
                if frame.advance(byte) {
                    return Step::Accepted;
                }
                // At top level the value has nothing after it, so any byte
                // that cannot extend a complete number is trailing noise
                if depth == 1 && frame.terminatable() {
                    stack.pop();
                    return Step::Finished(offset);
                }
                return Step::Rejected;
            }

            Frame::Literal(frame) => {
                if frame.literal.get(frame.pos) != Some(&byte) {
                    return Step::Rejected;
                }
                frame.pos += 1;
                if frame.pos == frame.literal.len() {
                    stack.pop();
                    return if stack.is_empty() {
                        Step::Finished(offset + 1)
                    } else {
                        Step::Accepted
                    };
                }
                return Step::Accepted;
            }

            Frame::Enum(frame) => {
                let cursor = frame.cursor;
                let extendable: Vec<&[u8]> = frame
                    .viable
                    .iter()
                    .copied()
                    .filter(|c| c.len() > cursor && c[cursor] == byte)
                    .collect();

                if !extendable.is_empty() {
                    frame.viable = extendable;
                    frame.cursor += 1;
                    if frame.fully_matched() && !frame.has_longer() {
                        stack.pop();
                        return if stack.is_empty() {
                            Step::Finished(offset + 1)
                        } else {
                            Step::Accepted
                        };
                    }
                    return Step::Accepted;
                }

                // A matched literal with a longer live alternative ends the
                // same way a number does: on a terminator, or on any
                // trailing byte at top level
                if frame.fully_matched() && (is_terminator(byte) || depth == 1) {
                    stack.pop();
                    if stack.is_empty() {
                        return Step::Finished(offset);
                    }
                    continue;
                }
                return Step::Rejected;
            }
        }
    }
}
