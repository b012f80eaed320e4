use moot_argv::{Arg, ArgAccess, ArgvTokenizer, Visitor};

/// What one `next_arg` call produced, with arguments decoded for easy
/// assertions.
#[derive(Debug, PartialEq, Eq)]
enum Event {
    Positional(String),
    LongOption { option: String, argument: String },
    Long { option: String, taken: Option<String> },
    LongRest { option: String, rest: Vec<String> },
    Short { option: char, taken: Option<String> },
}

fn text(arg: Arg<'_>) -> String {
    String::from_utf8(arg.bytes().to_vec()).unwrap()
}

/// A visitor that records events. Options listed in `takes` request a
/// single argument; options in `greedy` request every following value.
struct Recorder<'a> {
    takes: &'a [&'a str],
    greedy: &'a [&'a str],
}

impl<'arg> Visitor<'arg> for &Recorder<'_> {
    type Value = Event;

    fn visit_positional(self, argument: Arg<'arg>) -> Event {
        Event::Positional(text(argument))
    }

    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Event {
        Event::LongOption {
            option: text(option),
            argument: text(argument),
        }
    }

    fn visit_long(self, option: Arg<'arg>, arg: impl ArgAccess<'arg>) -> Event {
        let option = text(option);

        if self.greedy.contains(&option.as_str()) {
            let mut rest = Vec::new();
            arg.take_rest(|argument| rest.push(text(argument)));
            Event::LongRest { option, rest }
        } else if self.takes.contains(&option.as_str()) {
            Event::Long {
                taken: arg.take().map(text),
                option,
            }
        } else {
            Event::Long {
                option,
                taken: None,
            }
        }
    }

    fn visit_short(self, option: u8, arg: impl ArgAccess<'arg>) -> Event {
        let option = option as char;

        if self.takes.contains(&option.to_string().as_str()) {
            Event::Short {
                taken: arg.take().map(text),
                option,
            }
        } else {
            Event::Short {
                option,
                taken: None,
            }
        }
    }
}

fn run(recorder: &Recorder<'_>, argv: &[&str]) -> Vec<Event> {
    let mut tokens = ArgvTokenizer::new(argv.iter().map(|arg| arg.as_bytes()));
    let mut events = Vec::new();

    while let Some(event) = tokens.next_arg(recorder) {
        events.push(event);
    }

    events
}

#[test]
fn long_flags_and_options() {
    let recorder = Recorder {
        takes: &["output"],
        greedy: &[],
    };

    let events = run(&recorder, &["--verbose", "--output", "file.txt", "input"]);

    assert_eq!(
        events,
        [
            Event::Long {
                option: "verbose".into(),
                taken: None
            },
            Event::Long {
                option: "output".into(),
                taken: Some("file.txt".into())
            },
            Event::Positional("input".into()),
        ]
    );
}

#[test]
fn long_option_with_equals() {
    let recorder = Recorder {
        takes: &[],
        greedy: &[],
    };

    let events = run(&recorder, &["--output=file.txt"]);

    assert_eq!(
        events,
        [Event::LongOption {
            option: "output".into(),
            argument: "file.txt".into()
        }]
    );
}

#[test]
fn double_dash_forces_positionals() {
    let recorder = Recorder {
        takes: &[],
        greedy: &[],
    };

    let events = run(&recorder, &["--", "--verbose", "-x"]);

    assert_eq!(
        events,
        [
            Event::Positional("--verbose".into()),
            Event::Positional("-x".into()),
        ]
    );
}

#[test]
fn bare_dash_is_positional() {
    let recorder = Recorder {
        takes: &[],
        greedy: &[],
    };

    assert_eq!(run(&recorder, &["-"]), [Event::Positional("-".into())]);
}

#[test]
fn short_cluster_splits() {
    let recorder = Recorder {
        takes: &[],
        greedy: &[],
    };

    let events = run(&recorder, &["-xy"]);

    assert_eq!(
        events,
        [
            Event::Short {
                option: 'x',
                taken: None
            },
            Event::Short {
                option: 'y',
                taken: None
            },
        ]
    );
}

#[test]
fn short_option_takes_cluster_remainder() {
    let recorder = Recorder {
        takes: &["o"],
        greedy: &[],
    };

    let events = run(&recorder, &["-ovalue", "-o", "value"]);

    assert_eq!(
        events,
        [
            Event::Short {
                option: 'o',
                taken: Some("value".into())
            },
            Event::Short {
                option: 'o',
                taken: Some("value".into())
            },
        ]
    );
}

#[test]
fn greedy_run_stops_at_option_like_tokens() {
    let recorder = Recorder {
        takes: &[],
        greedy: &["items"],
    };

    let events = run(&recorder, &["--items", "a", "b", "-", "--next"]);

    assert_eq!(
        events,
        [
            Event::LongRest {
                option: "items".into(),
                rest: vec!["a".into(), "b".into(), "-".into()],
            },
            Event::Long {
                option: "next".into(),
                taken: None
            },
        ]
    );
}

#[test]
fn greedy_run_can_be_empty() {
    let recorder = Recorder {
        takes: &[],
        greedy: &["items"],
    };

    let events = run(&recorder, &["--items", "--next"]);

    assert_eq!(
        events,
        [
            Event::LongRest {
                option: "items".into(),
                rest: vec![],
            },
            Event::Long {
                option: "next".into(),
                taken: None
            },
        ]
    );
}

#[test]
fn greedy_run_leaves_double_dash_for_the_tokenizer() {
    let recorder = Recorder {
        takes: &[],
        greedy: &["items"],
    };

    let events = run(&recorder, &["--items", "a", "--", "b"]);

    assert_eq!(
        events,
        [
            Event::LongRest {
                option: "items".into(),
                rest: vec!["a".into()],
            },
            Event::Positional("b".into()),
        ]
    );
}

#[test]
fn option_argument_consumes_double_dash_boundary() {
    let recorder = Recorder {
        takes: &["output"],
        greedy: &[],
    };

    // `take` after `--output` hits `--`, which switches to positional-only
    // mode instead of being an argument.
    let events = run(&recorder, &["--output", "--", "value"]);

    assert_eq!(
        events,
        [
            Event::Long {
                option: "output".into(),
                taken: None
            },
            Event::Positional("value".into()),
        ]
    );
}
