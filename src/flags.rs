//! Flag-mode registration on top of `clap`.
//!
//! Every field is resolved and registered as a long option before the
//! argument vector is parsed, and the vector is parsed exactly once. Values
//! are then written through each field's [`Slot`]:
//!
//! - a flag that was given is coerced with strict booleans (`1` / `0`),
//! - an absent flag resets the field to its default text, or to zero.
//!
//! Only `i64`, `u64`, `f32`, `f64`, `String` and `bool` fields can be flags.
//! `required` is ignored.
//!
//! Parsing follows the usual long-flag conventions: a repeated flag keeps its
//! last value, parsing stops at the first positional argument (everything
//! after it is left alone), and string values may start with `-`. A field
//! named `help` replaces the built-in `--help`.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, warn};

use crate::bind::{assign, coercion_error};
use crate::coerce::{BoolStyle, Kind};
use crate::env::ConfigEnv;
use crate::error::{BindError, Origin};
use crate::spec::{Field, Slot};
use crate::tags::{FieldDescriptor, Mode};

const DEFAULT_PROGRAM: &str = "app";
const HELP_FLAG: &str = "help";
// Not a valid long flag, so it cannot collide with a field.
const REST_ID: &str = "--";

/// Register `fields`, parse the arguments of `env` and assign every field.
pub(crate) fn bind(
    fields: Vec<Field<'_>>,
    env: &dyn ConfigEnv,
    program: Option<&str>,
) -> Result<(), BindError> {
    let descriptors = fields
        .iter()
        .map(resolve)
        .collect::<Result<Vec<_>, _>>()?;

    let matches = parse(&descriptors, env, program)?;

    for (field, desc) in fields.into_iter().zip(&descriptors) {
        match matches.get_one::<String>(&desc.key) {
            Some(raw) => {
                assign(
                    field.slot,
                    desc,
                    Origin::flag(desc.key.as_str()),
                    raw,
                    BoolStyle::Strict,
                )?;
                debug!(field = desc.field, flag = %desc.key, "bound field from flag");
            }
            None => fall_back(field.slot, desc),
        }
    }
    Ok(())
}

/// Collect every problem [`bind`] would hit, without assigning.
pub(crate) fn check(
    fields: &[Field<'_>],
    env: &dyn ConfigEnv,
    program: Option<&str>,
) -> Vec<BindError> {
    let mut errors = Vec::new();
    let mut descriptors = Vec::with_capacity(fields.len());

    for field in fields {
        match resolve(field) {
            Ok(desc) => descriptors.push(desc),
            Err(err) => errors.push(err),
        }
    }

    match parse(&descriptors, env, program) {
        Ok(matches) => {
            for desc in &descriptors {
                if let Some(raw) = matches.get_one::<String>(&desc.key) {
                    if let Err(err) = desc.kind.check(raw, BoolStyle::Strict) {
                        errors.push(coercion_error(
                            desc,
                            Origin::flag(desc.key.as_str()),
                            raw,
                            err,
                        ));
                    }
                }
            }
        }
        Err(err) => errors.push(err),
    }

    errors
}

fn resolve(field: &Field<'_>) -> Result<FieldDescriptor, BindError> {
    let desc = FieldDescriptor::resolve(&field.tags, field.slot.kind(), Mode::Flags)?;
    if !desc.kind.is_flag_supported() {
        return Err(BindError::UnsupportedKind {
            field: desc.field,
            kind: desc.kind,
        });
    }
    Ok(desc)
}

fn parse(
    descriptors: &[FieldDescriptor],
    env: &dyn ConfigEnv,
    program: Option<&str>,
) -> Result<ArgMatches, BindError> {
    let args = env.args();
    let name = program
        .map(str::to_string)
        .or_else(|| {
            args.first()
                .and_then(|arg0| Path::new(arg0).file_name())
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    let mut seen = HashSet::new();
    for desc in descriptors {
        if !seen.insert(desc.key.as_str()) {
            return Err(BindError::DuplicateFlag {
                field: desc.field,
                flag: desc.key.clone(),
            });
        }
    }

    let command = descriptors
        .iter()
        .fold(Command::new(name), |command, desc| command.arg(flag_arg(desc)))
        .args_override_self(true)
        .disable_help_flag(seen.contains(HELP_FLAG))
        .arg(rest_arg());

    let matches = command.try_get_matches_from(args)?;
    if let Some(rest) = matches.get_many::<OsString>(REST_ID) {
        debug!(count = rest.len(), "left positional arguments unparsed");
    }
    Ok(matches)
}

/// Catch-all for the first positional argument and everything after it.
fn rest_arg() -> Arg {
    Arg::new(REST_ID)
        .action(ArgAction::Append)
        .num_args(1..)
        .trailing_var_arg(true)
        .value_parser(clap::value_parser!(OsString))
        .hide(true)
}

/// The clap argument for one field. Values are kept as text and coerced by
/// the switchboard.
fn flag_arg(desc: &FieldDescriptor) -> Arg {
    let arg = Arg::new(desc.key.clone())
        .long(desc.key.clone())
        .help(desc.usage)
        .action(ArgAction::Set)
        .value_parser(clap::value_parser!(String));

    match desc.kind {
        // `--debug` alone means "1"; `--debug=0` turns it off.
        Kind::Bool => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("1")
            .value_name("0|1"),
        Kind::Str => arg.allow_hyphen_values(true).value_name("STRING"),
        kind => arg
            .allow_negative_numbers(true)
            .value_name(kind.expected().to_uppercase()),
    }
}

/// Absent flag: default text if it parses, zero otherwise.
fn fall_back(slot: Slot<'_>, desc: &FieldDescriptor) {
    let Slot::Native(target) = slot else {
        return;
    };

    target.reset();
    if let Some(default) = desc.default {
        if let Err(err) = target.coerce(default, BoolStyle::Strict) {
            warn!(field = desc.field, default, error = %err, "ignoring unparsable flag default");
        }
    }
}
