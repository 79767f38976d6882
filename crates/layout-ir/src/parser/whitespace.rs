//! Whitespace parsing utilities.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::multispace1,
    combinator::{map, recognize},
    multi::many0,
    sequence::preceded,
    IResult,
};

/// Skip whitespace, newlines and `#` line comments.
pub(crate) fn blank(input: &str) -> IResult<&str, ()> {
    map(
        recognize(many0(alt((
            map(multispace1, |_| ()),
            map(preceded(tag("#"), take_till(|c| c == '\n')), |_| ()),
        )))),
        |_| (),
    )(input)
}
