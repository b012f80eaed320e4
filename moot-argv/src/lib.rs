#![no_std]

/*!
Low-level tokenization of command-line arguments. Takes care of the
distinctions between flags, options, and positionals: `--option`,
`--option=value`, short clusters like `-xvf`, and the `--` positionals-only
marker. No type handling happens here; callers receive raw byte slices
through a [`Visitor`] and decide for themselves what each token means.
*/

use core::fmt::{self, Debug, Write};
use core::iter::Peekable;

/**
One raw token from the command line: an option name, an option's argument,
or a positional. Given `--target foo --path=bar input.txt`, the values
`target`, `foo`, `path`, `bar`, and `input.txt` all arrive as [`Arg`]s.

Internally just a byte slice, since that's what the OS gives us. Callers
turn it into a [`str`] with [`from_utf8`][core::str::from_utf8] when they
need text.
*/
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Arg<'arg>(&'arg [u8]);

impl<'arg> Arg<'arg> {
    #[inline]
    #[must_use]
    pub const fn new(bytes: &'arg [u8]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &'arg [u8] {
        self.0
    }
}

/// Debug-print an arg as a string wherever possible, falling back to hex
/// for any non-utf-8 byte runs.
impl Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
            f.write_char('[')?;

            for (i, b) in bytes.iter().enumerate() {
                if i > 0 {
                    f.write_char(',')?;
                }
                write!(f, "{b:#x}")?;
            }

            f.write_char(']')
        }

        for (i, chunk) in self.0.utf8_chunks().enumerate() {
            if i > 0 {
                f.write_str("..")?;
            }

            let valid = chunk.valid();
            if !valid.is_empty() {
                write!(f, "{valid:?}")?;
            }

            let invalid = chunk.invalid();
            if !invalid.is_empty() {
                if !valid.is_empty() {
                    f.write_str("..")?;
                }
                write_bytes(f, invalid)?;
            }
        }

        Ok(())
    }
}

/// Receives each token the [`ArgvTokenizer`] finds, already classified as
/// positional, long, or short.
pub trait Visitor<'arg> {
    type Value;

    /// A positional parameter.
    fn visit_positional(self, argument: Arg<'arg>) -> Self::Value;

    /// A long option that definitely has an argument, because it was given
    /// as `--option=argument`
    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Self::Value;

    /// A long option or flag, such as `--option`
    fn visit_long(self, option: Arg<'arg>, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A short option or flag, such as `-o`
    fn visit_short(self, option: u8, arg: impl ArgAccess<'arg>) -> Self::Value;
}

/**
[`ArgAccess`] lets the visitor decide whether a given option wants an
argument, based on the option's identity.

`--foo bar` is ambiguous on its own: it might be the flag `--foo` followed
by the positional `bar`, or the option `--foo` with argument `bar`. Only
the visitor knows which, so the tokenizer hands it this access and takes
care of where the argument comes from if it's requested.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Take a single argument from the tokenizer. Only options that want an
    argument should call this; flags must leave it alone so the next token
    parses independently.

    Returns [`None`] when the input is exhausted, or when only positionals
    remain because a raw `--` was encountered.
    */
    fn take(self) -> Option<Arg<'arg>>;

    /**
    Greedily take every immediately following argument that doesn't look like
    an option (anything that doesn't start with `-`, other than a bare `-`).
    Each taken argument is passed to `push`; the total count is returned.

    This exists for options with one-or-more arity, like
    `--items a b c --next`. A raw `--` terminates the run without being
    consumed, so that the tokenizer can handle it normally.
    */
    fn take_rest(self, push: impl FnMut(Arg<'arg>)) -> usize;
}

/// `--` and anything spelled `-x…` ends a greedy argument run; a bare `-`
/// does not, since it conventionally names stdin.
#[inline]
fn is_option_like(token: &[u8]) -> bool {
    matches!(token, [b'-', _, ..])
}

#[derive(Debug, Clone)]
enum State<'arg> {
    Ready,
    PositionalOnly,
    /// The unconsumed remainder of a short cluster like `-xvf`. Never empty.
    ShortInProgress(&'arg [u8]),
}

/**
The entry point into `moot_argv`. Each call to `next_arg` consumes one
logical token (one element of a short cluster counts separately) and sends
it to the given [`Visitor`], handling the distinctions between flags,
options, and positionals, how options receive their argument values, and
the `--` positionals-only marker.

Everything operates on borrowed data; the assumption is that the argument
vector is collected once, early in `main`, and outlives the parse. The
ubiquitous `'arg` lifetime refers to that borrowed data.
*/
#[derive(Debug, Clone)]
pub struct ArgvTokenizer<'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    state: State<'arg>,
    args: Peekable<I>,
}

impl<'arg, I> ArgvTokenizer<'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    /// Create a tokenizer over an iterator of byte slices, one per
    /// command-line argument, *excluding* the program name.
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            args: args.into_iter().peekable(),
        }
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        debug_assert!(!matches!(self.state, State::ShortInProgress(_)));

        self.state = State::PositionalOnly;
        self.args
            .next()
            .map(Arg)
            .map(|arg| visitor.visit_positional(arg))
    }

    /// Put `self` into a `Ready` state, then return a StandardArgAccess
    #[inline]
    fn standard_arg(&mut self) -> StandardArgAccess<'_, 'arg, I> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::Ready;
        StandardArgAccess { parent: self }
    }

    /// Put `self` into a `ShortInProgress` state, then return a
    /// ShortArgAccess. `short` must be non-empty.
    #[inline]
    fn short_arg(&mut self, short: &'arg [u8]) -> ShortArgAccess<'_, 'arg> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));
        debug_assert!(!short.is_empty());

        self.state = State::ShortInProgress(short);
        ShortArgAccess {
            short,
            state: &mut self.state,
        }
    }

    /// Handle getting the argument for a `-s` short option. If there is
    /// remaining content in the cluster, it's a candidate for the argument;
    /// otherwise, the next argument in the input args is the candidate.
    #[inline]
    fn handle_short_argument<V>(&mut self, short: &'arg [u8], visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        match short.split_first() {
            // An empty cluster was a bare `-`, which is positional; it never
            // reaches this point, but degrade gracefully anyway.
            None => visitor.visit_positional(Arg(b"-")),
            Some((&option, b"")) => visitor.visit_short(option, self.standard_arg()),
            Some((&option, rest)) => visitor.visit_short(option, self.short_arg(rest)),
        }
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::Ready => match self.args.next()? {
                b"--" => self.positional_only_arg(visitor),
                argument => Some(match argument {
                    [b'-', b'-', option @ ..] => match split_once(option, b'=') {
                        Some((option, argument)) => {
                            visitor.visit_long_option(Arg(option), Arg(argument))
                        }
                        None => visitor.visit_long(Arg(option), self.standard_arg()),
                    },
                    [b'-'] => visitor.visit_positional(Arg(b"-")),
                    [b'-', short @ ..] => self.handle_short_argument(short, visitor),
                    positional => visitor.visit_positional(Arg(positional)),
                }),
            },
            State::PositionalOnly => self.positional_only_arg(visitor),
            State::ShortInProgress(short) => Some(self.handle_short_argument(short, visitor)),
        }
    }
}

/// ArgAccess implementation that gets arguments from the remaining input
/// list. Handles logic around the `--` positionals-only marker.
struct StandardArgAccess<'a, 'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    parent: &'a mut ArgvTokenizer<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    fn take(self) -> Option<Arg<'arg>> {
        match self.parent.args.next()? {
            b"--" if !matches!(self.parent.state, State::PositionalOnly) => {
                self.parent.state = State::PositionalOnly;
                None
            }
            arg => Some(Arg(arg)),
        }
    }

    fn take_rest(self, mut push: impl FnMut(Arg<'arg>)) -> usize {
        let mut count = 0;

        while let Some(&next) = self.parent.args.peek() {
            if is_option_like(next) {
                break;
            }

            push(Arg(next));
            self.parent.args.next();
            count += 1;
        }

        count
    }
}

/// ArgAccess implementation that gets the remainder of a short cluster.
/// Handles things like `-ovalue`, which is equivalent to `-o value`.
struct ShortArgAccess<'a, 'arg> {
    short: &'arg [u8],
    state: &'a mut State<'arg>,
}

impl<'arg> ArgAccess<'arg> for ShortArgAccess<'_, 'arg> {
    fn take(self) -> Option<Arg<'arg>> {
        debug_assert!(matches!(*self.state, State::ShortInProgress(short) if short == self.short));

        *self.state = State::Ready;
        Some(Arg(self.short))
    }

    fn take_rest(self, mut push: impl FnMut(Arg<'arg>)) -> usize {
        debug_assert!(matches!(*self.state, State::ShortInProgress(short) if short == self.short));

        *self.state = State::Ready;
        push(Arg(self.short));
        1
    }
}

fn split_once(input: &[u8], delimiter: u8) -> Option<(&[u8], &[u8])> {
    memchr::memchr(delimiter, input).map(|i| (&input[..i], &input[i + 1..]))
}
