//! Conservative CSS color grammar.
//!
//! Accepts hex triplets/sextuplets, `rgb()`/`rgba()` in comma or space
//! syntax, and the CSS named colors. Anything else (`hsl()`, `color-mix()`,
//! custom properties) is rejected rather than guessed at.

use thiserror::Error;

/// An 8-bit RGB color with a fractional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// Opacity in `[0.0, 1.0]`.
    pub alpha: f32,
}

impl Rgba {
    /// Fully opaque color from three channels.
    #[must_use]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }
}

/// A parsed CSS color value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssColor {
    /// Concrete color (hex, functional or named).
    Rgba(Rgba),
    /// The `currentcolor` keyword.
    CurrentColor,
}

impl std::fmt::Display for CssColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentColor => f.write_str("currentcolor"),
            Self::Rgba(c) if (c.alpha - 1.0).abs() < f32::EPSILON => {
                write!(f, "rgb({}, {}, {})", c.red, c.green, c.blue)
            }
            Self::Rgba(c) => write!(f, "rgba({}, {}, {}, {})", c.red, c.green, c.blue, c.alpha),
        }
    }
}

/// Why a color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color value is empty")]
    Empty,

    #[error("hex color '{0}' must have 3 or 6 hex digits")]
    InvalidHex(String),

    #[error("unsupported color function '{0}()' (expected rgb() or rgba())")]
    UnsupportedFunction(String),

    #[error("malformed color function: {0}")]
    Malformed(String),

    #[error("expected 3 or 4 components, found {0}")]
    ComponentCount(usize),

    #[error("invalid {channel} component '{value}': {reason}")]
    InvalidComponent {
        channel: &'static str,
        value: String,
        reason: String,
    },

    #[error("red, green and blue must all be numbers or all be percentages")]
    MixedChannels,

    #[error("unknown color name '{name}'{}", .suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
    UnknownName {
        name: String,
        suggestion: Option<String>,
    },
}

/// Parses a CSS color expression.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Errors
///
/// Returns a [`ColorError`] naming the rule the input broke.
pub fn parse_css_color(input: &str) -> Result<CssColor, ColorError> {
    let value = input.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(digits) = value.strip_prefix('#') {
        return parse_hex(digits).map(CssColor::Rgba);
    }

    if let Some(open) = value.find('(') {
        return parse_function(&value[..open], &value[open + 1..]).map(CssColor::Rgba);
    }

    parse_named(&value)
}

/// Returns `true` if `input` parses as a color.
#[must_use]
pub fn is_valid_css_color(input: &str) -> bool {
    parse_css_color(input).is_ok()
}

// ============================================================================
// Hex
// ============================================================================

fn parse_hex(digits: &str) -> Result<Rgba, ColorError> {
    let invalid = || ColorError::InvalidHex(format!("#{digits}"));
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map_err(|_| invalid());
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

    match digits.len() {
        3 => Ok(Rgba::opaque(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
        )),
        6 => Ok(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        _ => Err(invalid()),
    }
}

// ============================================================================
// rgb() / rgba()
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum ChannelKind {
    Number,
    Percentage,
}

const CHANNELS: [&str; 3] = ["red", "green", "blue"];

fn parse_function(name: &str, rest: &str) -> Result<Rgba, ColorError> {
    if name.ends_with(char::is_whitespace) {
        return Err(ColorError::Malformed("whitespace before '('".to_string()));
    }
    if name != "rgb" && name != "rgba" {
        return Err(ColorError::UnsupportedFunction(name.to_string()));
    }

    let args = rest
        .strip_suffix(')')
        .ok_or_else(|| ColorError::Malformed("missing closing ')'".to_string()))?;
    if args.contains(['(', ')']) {
        return Err(ColorError::Malformed("nested parentheses".to_string()));
    }

    let components = split_components(args)?;
    if !(3..=4).contains(&components.len()) {
        return Err(ColorError::ComponentCount(components.len()));
    }

    let mut rgb = [0u8; 3];
    let mut kind = None;
    for (i, raw) in components.iter().take(3).enumerate() {
        let (value, this_kind) = parse_channel(raw, CHANNELS[i])?;
        match kind {
            None => kind = Some(this_kind),
            Some(k) if k != this_kind => return Err(ColorError::MixedChannels),
            Some(_) => {}
        }
        rgb[i] = value;
    }

    let alpha = match components.get(3) {
        Some(raw) => parse_alpha(raw)?,
        None => 1.0,
    };

    Ok(Rgba {
        red: rgb[0],
        green: rgb[1],
        blue: rgb[2],
        alpha,
    })
}

/// Splits function arguments in either legacy comma syntax or modern
/// space syntax (`r g b / a`).
fn split_components(args: &str) -> Result<Vec<&str>, ColorError> {
    if args.contains(',') {
        if args.contains('/') {
            return Err(ColorError::Malformed(
                "cannot mix commas and '/'".to_string(),
            ));
        }
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if let Some(bad) = parts.iter().find(|p| p.is_empty() || p.contains(char::is_whitespace)) {
            return Err(ColorError::Malformed(format!(
                "bad comma-separated component '{bad}'"
            )));
        }
        return Ok(parts);
    }

    let (channels, alpha) = match args.split_once('/') {
        Some((left, right)) => (left, Some(right.trim())),
        None => (args, None),
    };

    let mut parts: Vec<&str> = channels.split_whitespace().collect();
    if alpha.is_none() && parts.len() == 4 {
        return Err(ColorError::Malformed(
            "alpha must follow '/' in space-separated syntax".to_string(),
        ));
    }
    if let Some(alpha) = alpha {
        if alpha.is_empty() || alpha.contains(char::is_whitespace) || alpha.contains('/') {
            return Err(ColorError::Malformed(format!("bad alpha component '{alpha}'")));
        }
        if parts.len() != 3 {
            return Err(ColorError::ComponentCount(parts.len() + 1));
        }
        parts.push(alpha);
    }
    Ok(parts)
}

/// Parses a plain decimal number (no exponent, no `inf`/`nan`).
fn parse_number(raw: &str) -> Option<f64> {
    let body = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let digits = body.chars().filter(char::is_ascii_digit).count();
    let dots = body.chars().filter(|&c| c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != body.len() {
        return None;
    }
    raw.parse().ok()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn parse_channel(raw: &str, channel: &'static str) -> Result<(u8, ChannelKind), ColorError> {
    let invalid = |reason: &str| ColorError::InvalidComponent {
        channel,
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    if let Some(pct) = raw.strip_suffix('%') {
        let p = parse_number(pct).ok_or_else(|| invalid("not a number"))?;
        if !(0.0..=100.0).contains(&p) {
            return Err(invalid("percentage must be between 0% and 100%"));
        }
        return Ok((to_byte(p * 255.0 / 100.0), ChannelKind::Percentage));
    }

    let n = parse_number(raw).ok_or_else(|| invalid("not a number"))?;
    if !(0.0..=255.0).contains(&n) {
        return Err(invalid("must be between 0 and 255"));
    }
    Ok((to_byte(n), ChannelKind::Number))
}

#[allow(clippy::cast_possible_truncation)]
fn parse_alpha(raw: &str) -> Result<f32, ColorError> {
    let invalid = |reason: &str| ColorError::InvalidComponent {
        channel: "alpha",
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let alpha = if let Some(pct) = raw.strip_suffix('%') {
        let p = parse_number(pct).ok_or_else(|| invalid("not a number"))?;
        if !(0.0..=100.0).contains(&p) {
            return Err(invalid("percentage must be between 0% and 100%"));
        }
        p / 100.0
    } else {
        let n = parse_number(raw).ok_or_else(|| invalid("not a number"))?;
        if !(0.0..=1.0).contains(&n) {
            return Err(invalid("must be between 0 and 1"));
        }
        n
    };
    Ok(alpha as f32)
}

// ============================================================================
// Named colors
// ============================================================================

fn parse_named(name: &str) -> Result<CssColor, ColorError> {
    match name {
        "currentcolor" => return Ok(CssColor::CurrentColor),
        "transparent" => {
            return Ok(CssColor::Rgba(Rgba {
                red: 0,
                green: 0,
                blue: 0,
                alpha: 0.0,
            }));
        }
        _ => {}
    }

    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, [r, g, b])| CssColor::Rgba(Rgba::opaque(*r, *g, *b)))
        .ok_or_else(|| ColorError::UnknownName {
            name: name.to_string(),
            suggestion: suggest_color_name(name),
        })
}

/// Suggests the closest known color keyword for a misspelled name.
///
/// Returns a match only if its Damerau-Levenshtein distance is ≤ 2.
#[must_use]
pub fn suggest_color_name(input: &str) -> Option<String> {
    NAMED_COLORS
        .iter()
        .map(|(n, _)| *n)
        .chain(["transparent", "currentcolor"])
        .map(|n| (n, strsim::damerau_levenshtein(input, n)))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(n, _)| n.to_string())
}

/// CSS Color Module Level 4 named colors.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];
