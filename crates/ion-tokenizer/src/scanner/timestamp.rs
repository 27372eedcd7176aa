//! Timestamp scanning, entered from [`super::number`] once a 4-digit year
//! run is confirmed. Validates calendar structure (month range, per-month
//! day maxima, Feb-29 leap years) and the required time zone.

use super::{is_value_terminator, peek1};
use crate::decoder::CharDecoder;
use crate::error::ErrorKind;
use crate::options::TokenizerOptions;
use crate::token::{Token, TokenKind};

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// The Gregorian leap-year rule: divisible by 4, not by 100 unless also by
/// 400.
#[must_use]
pub(crate) fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// `start` is the token's overall start offset (the first year digit);
/// `year` is the already-consumed 4-digit year. The character following the
/// year (`-` or `T`) has been peeked by the caller but not yet consumed.
pub(crate) fn scan(
    decoder: &mut CharDecoder,
    start: usize,
    year: u32,
    options: &TokenizerOptions,
) -> Result<Token, ErrorKind> {
    let _ = options;

    if matches!(peek1(decoder)?, Some('T')) {
        decoder.read_char()?;
        return finish(decoder, start);
    }

    expect_char(decoder, '-')?;
    let month = read_two_digits(decoder)?;
    if !(1..=12).contains(&month) {
        return Err(ErrorKind::BadToken(None));
    }

    match peek1(decoder)? {
        Some('T') => {
            decoder.read_char()?;
            finish(decoder, start)
        }
        Some('-') => {
            decoder.read_char()?;
            let day = read_two_digits(decoder)?;
            let max_day = if month == 2 && is_leap_year(year) {
                29
            } else {
                DAYS_IN_MONTH[(month - 1) as usize]
            };
            if day < 1 || day > max_day {
                return Err(ErrorKind::BadToken(None));
            }
            if matches!(peek1(decoder)?, Some('T')) {
                decoder.read_char()?;
                scan_time(decoder, start)
            } else {
                finish(decoder, start)
            }
        }
        _ => finish(decoder, start),
    }
}

fn scan_time(decoder: &mut CharDecoder, start: usize) -> Result<Token, ErrorKind> {
    let hour = read_two_digits(decoder)?;
    if hour > 23 {
        return Err(ErrorKind::BadToken(None));
    }
    expect_char(decoder, ':')?;
    let minute = read_two_digits(decoder)?;
    if minute > 59 {
        return Err(ErrorKind::BadToken(None));
    }

    if matches!(peek1(decoder)?, Some(':')) {
        decoder.read_char()?;
        let second = read_two_digits(decoder)?;
        if second > 59 {
            return Err(ErrorKind::BadToken(None));
        }
        if matches!(peek1(decoder)?, Some('.')) {
            decoder.read_char()?;
            let mut saw_digit = false;
            loop {
                match decoder.read_char()? {
                    Some(d) if d.is_ascii_digit() => saw_digit = true,
                    Some(_) => {
                        decoder.unread();
                        break;
                    }
                    None => break,
                }
            }
            if !saw_digit {
                return Err(ErrorKind::BadToken(None));
            }
        }
    }

    match decoder.read_char()? {
        Some('Z' | 'z') => {}
        Some(sign @ ('+' | '-')) => {
            let _ = sign;
            let tz_hour = read_two_digits(decoder)?;
            if tz_hour > 23 {
                return Err(ErrorKind::BadToken(None));
            }
            expect_char(decoder, ':')?;
            let tz_minute = read_two_digits(decoder)?;
            if tz_minute > 59 {
                return Err(ErrorKind::BadToken(None));
            }
        }
        other => return Err(ErrorKind::BadToken(other)),
    }

    finish(decoder, start)
}

fn finish(decoder: &mut CharDecoder, start: usize) -> Result<Token, ErrorKind> {
    let next = peek1(decoder)?;
    if !is_value_terminator(next, decoder)? {
        return Err(ErrorKind::BadToken(next));
    }
    Ok(Token::new(TokenKind::Timestamp, start, decoder.position()))
}

fn expect_char(decoder: &mut CharDecoder, expected: char) -> Result<(), ErrorKind> {
    match decoder.read_char()? {
        Some(c) if c == expected => Ok(()),
        other => Err(ErrorKind::BadToken(other)),
    }
}

fn read_two_digits(decoder: &mut CharDecoder) -> Result<u32, ErrorKind> {
    let mut value = 0;
    for _ in 0..2 {
        let c = decoder.read_char()?.ok_or(ErrorKind::UnexpectedEof)?;
        let digit = c.to_digit(10).ok_or(ErrorKind::BadToken(Some(c)))?;
        value = value * 10 + digit;
    }
    Ok(value)
}
