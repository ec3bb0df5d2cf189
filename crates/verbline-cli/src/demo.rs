//! The demo grammar:
//!
//! ```text
//! SHOW  VOLUME <volume>  /UUID=<uuid> /FULL
//!       USER   <user>    /FULL /GROUP=<group>
//!       VM     <vm-id>   /FULL /GROUP=<group>
//!
//! DIFF  <file1> <file2>  /START=<lbn> /END=<lbn> /COUNT=<lbn>
//!                        /IGNORE /LOGGING=(FULL, TRACE, ERROR)
//! ```

use verbline_grammar::{Keyword, Parameter, Qualifier, ValueType, Verb};

// Dispatch tags surfaced on the parsed verb chain.
pub const SHOW_VOLUME: u64 = 1;
pub const SHOW_USER: u64 = 2;
pub const SHOW_VM: u64 = 3;
pub const DIFF: u64 = 4;

pub fn grammar() -> Vec<Verb> {
    let full = || Qualifier::new("full", ValueType::Flag);
    let group = || Qualifier::new("group", ValueType::QuotedString);

    vec![
        Verb::group(
            "show",
            vec![
                Verb::leaf("volume", SHOW_VOLUME)
                    .params(vec![Parameter::new(
                        1,
                        "Volume name (eg: sdb, sdb1, sda5)",
                        ValueType::Device,
                    )])
                    .quals(vec![Qualifier::new("uuid", ValueType::Uuid), full()]),
                Verb::leaf("user", SHOW_USER)
                    .params(vec![Parameter::new(1, "User spec", ValueType::QuotedString)])
                    .quals(vec![full(), group()]),
                Verb::leaf("vm", SHOW_VM)
                    .params(vec![Parameter::new(1, "VM Id", ValueType::QuotedString)])
                    .quals(vec![full(), group()]),
            ],
        ),
        Verb::leaf("diff", DIFF)
            .params(vec![
                Parameter::new(1, "Input file 1", ValueType::File),
                Parameter::new(2, "Input file 2", ValueType::File),
            ])
            .quals(vec![
                Qualifier::new("start", ValueType::Number),
                Qualifier::new("end", ValueType::Number),
                Qualifier::new("count", ValueType::Number),
                Qualifier::new("ignore", ValueType::Flag),
                Qualifier::new("logging", ValueType::Keyword).keywords(vec![
                    Keyword::new("FULL", 1),
                    Keyword::new("TRACE", 2),
                    Keyword::new("ERROR", 3),
                ]),
            ]),
    ]
}
