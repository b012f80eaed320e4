/*!
The built-in runtime collaborator: an argument parser that accepts
[`Registration`]s through the [`Registry`] seam, tokenizes argv with
[`moot_argv`], and produces a raw result tree.

One parse invocation is a single synchronous pass over the argument vector.
Results nest structurally: selecting a subcommand opens a child scope, and
that scope's results land under the subcommand's name in the parent map,
so no path-encoded keys are ever produced here.
*/

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::str;

use moot_argv::{Arg, ArgAccess, ArgvTokenizer, Visitor};
use tracing::debug;

use crate::errors::{ParseError, SchemaError};
use crate::printers::render_help;
use crate::registry::{Action, Registration, Registry};
use crate::value::Value;

/// Where a flag spelling points: which registration, and whether this
/// spelling is the negated half of a [`Action::BoolSwitch`].
#[derive(Debug, Clone, Copy)]
struct Slot {
    index: usize,
    negated: bool,
}

/// A registration-driven argument parser for one command scope. Subcommand
/// scopes are themselves `Parser`s, owned by their parent.
pub struct Parser {
    program: String,
    description: Option<String>,
    registrations: Vec<Registration>,
    /// Flag spelling (without the leading `--`) to registration slot.
    lookup: BTreeMap<String, Slot>,
    /// Subcommands in registration order.
    commands: Vec<(String, Parser)>,
}

impl Parser {
    #[must_use]
    pub fn new(program: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            program: program.into(),
            description: description.map(str::to_owned),
            registrations: Vec::new(),
            lookup: BTreeMap::new(),
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub(crate) fn commands(&self) -> &[(String, Parser)] {
        &self.commands
    }

    /// The rendered help text for this scope.
    #[must_use]
    pub fn help(&self) -> String {
        render_help(self)
    }

    /**
    Parse one argument vector into a raw result tree.

    The vector should exclude the program name. After the token pass,
    required-but-absent options are an error, absent options with a
    registration default are filled in, and every entered subcommand
    scope's results are nested under the subcommand's name. Options
    belonging to a scope that was never entered are simply absent.

    `--help` or `-h` anywhere aborts with [`ParseError::HelpRequested`]
    carrying the help text of the innermost scope reached so far.
    */
    pub fn parse<'arg, I>(&self, argv: I) -> Result<Value, ParseError>
    where
        I: IntoIterator<Item = &'arg [u8]>,
    {
        debug!(program = %self.program, "parsing argument vector");

        let mut tokens = ArgvTokenizer::new(argv.into_iter());
        let mut state = ParseState {
            chain: vec![ScopeState {
                name: String::new(),
                parser: self,
                results: BTreeMap::new(),
            }],
        };

        while let Some(result) = tokens.next_arg(&mut state) {
            result?;
        }

        // Required enforcement and default filling, per entered scope only.
        for scope in &mut state.chain {
            for registration in &scope.parser.registrations {
                if scope.results.contains_key(&registration.dest) {
                    continue;
                }

                if registration.required {
                    return Err(ParseError::Required {
                        flag: display_flag(registration),
                    });
                }

                if let Some(default) = &registration.default {
                    scope
                        .results
                        .insert(registration.dest.clone(), default.clone());
                }
            }
        }

        // Fold the scope chain innermost-first: each child's results nest
        // under its command name in the parent.
        let mut chain = state.chain;
        while let Some(child) = chain.pop() {
            match chain.last_mut() {
                Some(parent) => {
                    parent.results.insert(child.name, Value::Map(child.results));
                }
                None => return Ok(Value::Map(child.results)),
            }
        }

        Ok(Value::Map(BTreeMap::new()))
    }

    /// Convenience over [`parse`][Self::parse] for string arguments.
    pub fn parse_args<'a, I>(&self, args: I) -> Result<Value, ParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.parse(args.into_iter().map(str::as_bytes))
    }
}

impl Registry for Parser {
    fn register(&mut self, registration: Registration) -> Result<(), SchemaError> {
        if self
            .registrations
            .iter()
            .any(|existing| existing.dest == registration.dest)
        {
            return Err(SchemaError::DuplicateDest {
                dest: registration.dest,
            });
        }

        let spelling = registration
            .flag
            .strip_prefix("--")
            .unwrap_or(&registration.flag)
            .to_owned();

        let index = self.registrations.len();

        if matches!(registration.action, Action::BoolSwitch) {
            insert_spelling(
                &mut self.lookup,
                format!("no-{spelling}"),
                Slot {
                    index,
                    negated: true,
                },
            )?;
        }

        insert_spelling(
            &mut self.lookup,
            spelling,
            Slot {
                index,
                negated: false,
            },
        )?;

        self.registrations.push(registration);
        Ok(())
    }

    fn command(&mut self, name: &str, help: Option<&str>) -> &mut Self {
        let index = match self.commands.iter().position(|(n, _)| n == name) {
            Some(index) => index,
            None => {
                self.commands.push((name.to_owned(), Parser::new(name, help)));
                self.commands.len() - 1
            }
        };

        &mut self.commands[index].1
    }
}

fn insert_spelling(
    lookup: &mut BTreeMap<String, Slot>,
    spelling: String,
    slot: Slot,
) -> Result<(), SchemaError> {
    match lookup.entry(spelling) {
        Entry::Occupied(entry) => Err(SchemaError::DuplicateFlag {
            spelling: entry.key().clone(),
        }),
        Entry::Vacant(entry) => {
            entry.insert(slot);
            Ok(())
        }
    }
}

/// The user-facing spelling of a registration, for error messages. A
/// boolean switch shows both of its halves.
fn display_flag(registration: &Registration) -> String {
    match registration.action {
        Action::BoolSwitch => {
            let spelling = registration
                .flag
                .strip_prefix("--")
                .unwrap_or(&registration.flag);
            format!("--{spelling} / --no-{spelling}")
        }
        _ => registration.flag.clone(),
    }
}

/// One command scope entered during a parse: the parser that defines it
/// and the results collected so far.
struct ScopeState<'p> {
    /// The subcommand name this scope nests under; empty for the root.
    name: String,
    parser: &'p Parser,
    results: BTreeMap<String, Value>,
}

struct ParseState<'p> {
    /// Entered scopes, root first. Never empty.
    chain: Vec<ScopeState<'p>>,
}

impl<'p> ParseState<'p> {
    fn parser(&self) -> &'p Parser {
        self.chain[self.chain.len() - 1].parser
    }

    fn results(&mut self) -> &mut BTreeMap<String, Value> {
        let last = self.chain.len() - 1;
        &mut self.chain[last].results
    }

    fn slot(&self, spelling: &str) -> Result<(Slot, &'p Registration), ParseError> {
        let parser = self.parser();

        let slot = parser
            .lookup
            .get(spelling)
            .copied()
            .ok_or_else(|| ParseError::UnknownOption {
                option: spelling.to_owned(),
            })?;

        Ok((slot, &parser.registrations[slot.index]))
    }
}

fn arg_str<'arg>(arg: Arg<'arg>) -> Result<&'arg str, ParseError> {
    str::from_utf8(arg.bytes()).map_err(|_| ParseError::InvalidUtf8)
}

impl<'a, 'p, 'arg> Visitor<'arg> for &'a mut ParseState<'p> {
    type Value = Result<(), ParseError>;

    fn visit_positional(self, argument: Arg<'arg>) -> Self::Value {
        let name = arg_str(argument)?;
        let parser = self.parser();

        if parser.commands.is_empty() {
            return Err(ParseError::UnexpectedPositional {
                argument: name.to_owned(),
            });
        }

        match parser.commands.iter().find(|(n, _)| n == name) {
            Some((n, child)) => {
                self.chain.push(ScopeState {
                    name: n.clone(),
                    parser: child,
                    results: BTreeMap::new(),
                });
                Ok(())
            }
            None => Err(ParseError::UnknownSubcommand {
                name: name.to_owned(),
                expected: parser.commands.iter().map(|(n, _)| n.clone()).collect(),
            }),
        }
    }

    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Self::Value {
        let spelling = arg_str(option)?;
        let value = arg_str(argument)?;
        let (_, registration) = self.slot(spelling)?;

        match registration.action {
            Action::Store => {
                self.results()
                    .insert(registration.dest.clone(), Value::Str(value.to_owned()));
                Ok(())
            }
            Action::StoreMany => {
                append_many(
                    self.results(),
                    &registration.dest,
                    vec![Value::Str(value.to_owned())],
                );
                Ok(())
            }
            _ => Err(ParseError::UnexpectedArgument {
                option: spelling.to_owned(),
            }),
        }
    }

    fn visit_long(self, option: Arg<'arg>, access: impl ArgAccess<'arg>) -> Self::Value {
        let spelling = arg_str(option)?;

        // --help is reserved and beats any registration.
        if spelling == "help" {
            return Err(ParseError::HelpRequested {
                help: self.parser().help(),
            });
        }

        let (slot, registration) = self.slot(spelling)?;

        match &registration.action {
            Action::Store => {
                let argument = access.take().ok_or_else(|| ParseError::NeedsArgument {
                    option: spelling.to_owned(),
                })?;
                let value = arg_str(argument)?;

                // A repeat overwrites: last one wins.
                self.results()
                    .insert(registration.dest.clone(), Value::Str(value.to_owned()));
                Ok(())
            }
            Action::StoreMany => {
                let mut items = Vec::new();
                let mut invalid = false;

                let count = access.take_rest(|argument| match str::from_utf8(argument.bytes()) {
                    Ok(text) => items.push(Value::Str(text.to_owned())),
                    Err(_) => invalid = true,
                });

                if invalid {
                    return Err(ParseError::InvalidUtf8);
                }

                if count == 0 {
                    return Err(ParseError::NeedsArgument {
                        option: spelling.to_owned(),
                    });
                }

                append_many(self.results(), &registration.dest, items);
                Ok(())
            }
            Action::StoreTrue => {
                self.results()
                    .insert(registration.dest.clone(), Value::Bool(true));
                Ok(())
            }
            Action::StoreFalse => {
                self.results()
                    .insert(registration.dest.clone(), Value::Bool(false));
                Ok(())
            }
            Action::StoreConst(constant) => {
                let constant = constant.clone();
                self.results().insert(registration.dest.clone(), constant);
                Ok(())
            }
            Action::BoolSwitch => {
                self.results()
                    .insert(registration.dest.clone(), Value::Bool(!slot.negated));
                Ok(())
            }
        }
    }

    fn visit_short(self, option: u8, _access: impl ArgAccess<'arg>) -> Self::Value {
        if option == b'h' {
            return Err(ParseError::HelpRequested {
                help: self.parser().help(),
            });
        }

        Err(ParseError::UnknownShort {
            option: option as char,
        })
    }
}

/// Repeated one-or-more options append rather than overwrite.
fn append_many(results: &mut BTreeMap<String, Value>, dest: &str, items: Vec<Value>) {
    match results.entry(dest.to_owned()) {
        Entry::Occupied(mut entry) => match entry.get_mut() {
            Value::List(existing) => existing.extend(items),
            other => *other = Value::List(items),
        },
        Entry::Vacant(entry) => {
            entry.insert(Value::List(items));
        }
    }
}
