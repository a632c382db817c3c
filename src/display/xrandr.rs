//! Display-server session backed by the `xrandr` binary.
//!
//! Enumeration parses `xrandr --verbose`, which is the only query form that
//! reports the raw mode timings (dot-clock, horizontal/vertical totals)
//! the mode resolver works from. Application issues `--fb`/`--fbmm` for
//! the virtual screen and `--output …` for each monitor.
//!
//! The plain query does not report the whole-screen physical size, so the
//! millimeter dimensions are taken from the primary (else first) connected
//! output's header. They only feed the derived-DPI fallback and the
//! non-retract clamp.

use std::path::PathBuf;

use tracing::debug;

use crate::display::{DisplayServer, Mode, Output, ScreenSize};
use crate::error::DisplayError;
use crate::exec;
use crate::layout::MonitorSpec;

/// An owned session against the X display, valid for one invocation.
#[derive(Debug)]
pub struct XrandrSession {
    xrandr: PathBuf,
}

impl XrandrSession {
    /// Open a session, verifying the `xrandr` binary is available.
    ///
    /// # Errors
    ///
    /// [`DisplayError::Unavailable`] when `xrandr` is not on `PATH`.
    pub fn open() -> Result<Self, DisplayError> {
        let xrandr = which::which("xrandr")
            .map_err(|err| DisplayError::Unavailable(format!("xrandr not found: {err}")))?;
        Ok(Self { xrandr })
    }

    fn query(&self) -> Result<VerboseQuery, DisplayError> {
        let xrandr = self.xrandr.display().to_string();
        let result = exec::run(&xrandr, &["--verbose"]).map_err(|err| DisplayError::Command {
            command: "xrandr --verbose".to_string(),
            message: format!("{err:#}"),
        })?;
        parse_verbose(&result.stdout)
    }

    fn run(&self, args: &[String]) -> Result<(), DisplayError> {
        let xrandr = self.xrandr.display().to_string();
        debug!(?args, "xrandr");
        exec::run(&xrandr, args)
            .map(|_| ())
            .map_err(|err| DisplayError::Command {
                command: format!("xrandr {}", args.join(" ")),
                message: format!("{err:#}"),
            })
    }
}

impl DisplayServer for XrandrSession {
    fn outputs(&mut self) -> Result<Vec<Output>, DisplayError> {
        Ok(self.query()?.outputs)
    }

    fn screen_size(&mut self) -> Result<ScreenSize, DisplayError> {
        let query = self.query()?;
        let (mm_width, mm_height) = query.physical_size();
        Ok(ScreenSize {
            width: query.screen_width,
            height: query.screen_height,
            mm_width,
            mm_height,
        })
    }

    fn set_screen_size(&mut self, size: &ScreenSize) -> Result<(), DisplayError> {
        let mut args = vec!["--fb".to_string(), format!("{}x{}", size.width, size.height)];
        if size.mm_width > 0 && size.mm_height > 0 {
            args.push("--fbmm".to_string());
            args.push(format!("{}x{}", size.mm_width, size.mm_height));
        }
        self.run(&args)
    }

    fn apply_monitor(&mut self, spec: &MonitorSpec) -> Result<(), DisplayError> {
        let mode = spec
            .mode
            .as_ref()
            .ok_or_else(|| DisplayError::UnresolvedMode(spec.id.clone()))?;
        let mut args = vec![
            "--output".to_string(),
            spec.id.clone(),
            "--mode".to_string(),
            format!("{}x{}", mode.width, mode.height),
            "--rate".to_string(),
            format!("{:.2}", mode.rate),
            "--pos".to_string(),
            format!("{}x{}", spec.xoffset, spec.yoffset),
            "--rotate".to_string(),
            spec.rotation.as_str().to_string(),
        ];
        if spec.primary {
            args.push("--primary".to_string());
        }
        self.run(&args)
    }
}

/// Parsed `xrandr --verbose` output.
#[derive(Debug, Default)]
struct VerboseQuery {
    screen_width: u32,
    screen_height: u32,
    outputs: Vec<Output>,
}

impl VerboseQuery {
    /// Physical size from the primary (else first) connected output header.
    fn physical_size(&self) -> (u32, u32) {
        self.outputs
            .iter()
            .filter(|o| o.connected)
            .find(|o| o.primary)
            .or_else(|| self.outputs.iter().find(|o| o.connected))
            .map_or((0, 0), |o| (o.mm_width, o.mm_height))
    }
}

fn parse_verbose(text: &str) -> Result<VerboseQuery, DisplayError> {
    let mut query = VerboseQuery::default();
    let mut pending: Option<Mode> = None;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("Screen ") {
            let (width, height) = parse_current_size(rest)
                .ok_or_else(|| DisplayError::Parse(format!("bad screen line: {line:?}")))?;
            query.screen_width = width;
            query.screen_height = height;
        } else if !line.starts_with(char::is_whitespace) {
            if let Some(output) = parse_output_header(line) {
                flush_mode(&mut query, &mut pending);
                query.outputs.push(output);
            }
        } else if line.contains("MHz") && !line.trim_start().starts_with(['h', 'v']) {
            flush_mode(&mut query, &mut pending);
            pending = parse_mode_header(line);
        } else if let Some(mode) = pending.as_mut() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("h:") {
                mode.h_total = parse_total(trimmed).unwrap_or(0);
            } else if trimmed.starts_with("v:") {
                mode.v_total = parse_total(trimmed).unwrap_or(0);
                flush_mode(&mut query, &mut pending);
            }
        }
    }
    flush_mode(&mut query, &mut pending);

    if query.screen_width == 0 {
        return Err(DisplayError::Parse(
            "no Screen line in xrandr output".to_string(),
        ));
    }
    Ok(query)
}

/// Attach a completed mode block to the output it belongs to.
fn flush_mode(query: &mut VerboseQuery, pending: &mut Option<Mode>) {
    if let Some(mode) = pending.take()
        && let Some(output) = query.outputs.last_mut()
    {
        output.modes.push(mode);
    }
}

/// `… minimum 8 x 8, current 1920 x 1080, maximum 32767 x 32767`
fn parse_current_size(rest: &str) -> Option<(u32, u32)> {
    let (_, after) = rest.split_once("current ")?;
    let mut parts = after.split(&[' ', ','][..]).filter(|s| !s.is_empty());
    let width = parts.next()?.parse().ok()?;
    let x = parts.next()?;
    if x != "x" {
        return None;
    }
    let height = parts.next()?.parse().ok()?;
    Some((width, height))
}

/// `eDP-1 connected primary 1920x1080+0+0 (0x48) normal (…) 344mm x 194mm`
fn parse_output_header(line: &str) -> Option<Output> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let connected = match tokens.next()? {
        "connected" => true,
        "disconnected" => false,
        _ => return None,
    };
    let rest: Vec<&str> = tokens.collect();
    let primary = rest.contains(&"primary");
    let mut mm = rest
        .iter()
        .filter_map(|t| t.strip_suffix("mm"))
        .filter_map(|t| t.parse::<u32>().ok());
    let mm_width = mm.next().unwrap_or(0);
    let mm_height = mm.next().unwrap_or(0);
    Some(Output {
        name: name.to_string(),
        connected,
        primary,
        mm_width,
        mm_height,
        modes: Vec::new(),
    })
}

/// `  1920x1080 (0x48) 138.700MHz +HSync -VSync *current +preferred`
fn parse_mode_header(line: &str) -> Option<Mode> {
    let mut tokens = line.split_whitespace();
    let geometry = tokens.next()?;
    let (width, height) = parse_geometry(geometry)?;
    let mhz = tokens
        .find_map(|t| t.strip_suffix("MHz"))?
        .parse::<f64>()
        .ok()?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dot_clock = (mhz * 1_000_000.0) as u64;
    Some(Mode {
        width,
        height,
        dot_clock,
        h_total: 0,
        v_total: 0,
    })
}

/// `1920x1080` with an optional interlace/doublescan suffix on the height.
fn parse_geometry(token: &str) -> Option<(u32, u32)> {
    let (w, h) = token.split_once('x')?;
    let width = w.parse().ok()?;
    let digits: String = h.chars().take_while(char::is_ascii_digit).collect();
    let height = digits.parse().ok()?;
    Some((width, height))
}

/// `h: width 1920 start 1968 end 2000 total 2080 …` — the value after `total`.
fn parse_total(line: &str) -> Option<u32> {
    let mut tokens = line.split_whitespace();
    tokens.find(|t| *t == "total")?;
    tokens.next()?.parse().ok()
}
