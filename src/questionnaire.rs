//! Interactive questionnaire.
//!
//! Asks the five questions in order and re-asks any question whose answer
//! is not one of its choices. Answers may be given by list number or by
//! name. Works over any reader/writer pair so it can be driven from a
//! terminal or from tests.

use crate::preference::{EnergyLevel, Instrumentation, Mood, Preference, Tempo};
use anyhow::{bail, Context, Result};
use log::debug;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const GENRE_QUESTION: &str = "What genre do you enjoy?";
pub const TEMPO_QUESTION: &str = "Do you prefer fast or slow songs?";
pub const ENERGY_QUESTION: &str = "Do you like upbeat or calm music?";
pub const INSTRUMENTATION_QUESTION: &str = "Do you prefer instrumental or lyrical songs?";
pub const MOOD_QUESTION: &str = "What mood are you in?";

/// Runs the questionnaire and returns the validated answers.
///
/// # Errors
///
/// Fails if `genres` is empty, if the input ends before every question is
/// answered, or on I/O errors.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    genres: &[String],
) -> Result<Preference> {
    if genres.is_empty() {
        bail!("The catalog has no genres to choose from");
    }

    let genre = ask(input, output, GENRE_QUESTION, genres, |answer| {
        genres
            .iter()
            .find(|genre| genre.to_lowercase() == answer.to_lowercase())
            .cloned()
            .ok_or_else(|| format!("Unknown genre `{answer}`"))
    })?;
    let tempo = ask_choice::<Tempo, _, _>(input, output, TEMPO_QUESTION, Tempo::LABELS)?;
    let energy =
        ask_choice::<EnergyLevel, _, _>(input, output, ENERGY_QUESTION, EnergyLevel::LABELS)?;
    let instrumentation = ask_choice::<Instrumentation, _, _>(
        input,
        output,
        INSTRUMENTATION_QUESTION,
        Instrumentation::LABELS,
    )?;
    let mood = ask_choice::<Mood, _, _>(input, output, MOOD_QUESTION, Mood::LABELS)?;

    let preference = Preference {
        genre,
        tempo,
        energy,
        instrumentation,
        mood,
    };
    debug!("Questionnaire answers: {preference:?}");
    Ok(preference)
}

fn ask_choice<T, R, W>(input: &mut R, output: &mut W, question: &str, labels: &[&str]) -> Result<T>
where
    T: FromStr,
    T::Err: ToString,
    R: BufRead,
    W: Write,
{
    ask(input, output, question, labels, |answer| {
        answer.parse::<T>().map_err(|e| e.to_string())
    })
}

/// Prompts until `parse` accepts an answer. A number in range selects the
/// matching choice.
fn ask<T, S, R, W, F>(
    input: &mut R,
    output: &mut W,
    question: &str,
    choices: &[S],
    parse: F,
) -> Result<T>
where
    S: AsRef<str>,
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        writeln!(output, "{question}")?;
        for (number, choice) in choices.iter().enumerate() {
            writeln!(output, "  {}) {}", number + 1, choice.as_ref())?;
        }
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .with_context(|| format!("Failed to read answer to `{question}`"))?;
        if read == 0 {
            bail!("Input ended before `{question}` was answered");
        }

        let answer = line.trim();
        let answer = match answer.parse::<usize>() {
            Ok(number) if (1..=choices.len()).contains(&number) => choices[number - 1].as_ref(),
            _ => answer,
        };

        match parse(answer) {
            Ok(value) => return Ok(value),
            Err(message) => writeln!(output, "{message}. Please try again.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn genres() -> Vec<String> {
        vec!["dance pop".to_string(), "indie rock".to_string()]
    }

    fn run_with(answers: &str) -> (Result<Preference>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = run(&mut input, &mut output, &genres());
        (result, String::from_utf8(output).expect("utf-8 output"))
    }

    #[test]
    fn test_answers_by_name() {
        let (result, output) = run_with("Indie Rock\nslow\ncalm\nwith lyrics\nromantic\n");
        let preference = result.expect("all answers valid");

        assert_eq!(preference.genre, "indie rock");
        assert_eq!(preference.tempo, Tempo::Slow);
        assert_eq!(preference.energy, EnergyLevel::Calm);
        assert_eq!(preference.instrumentation, Instrumentation::WithLyrics);
        assert_eq!(preference.mood, Mood::Romantic);
        assert!(output.contains(GENRE_QUESTION));
        assert!(output.contains("  2) indie rock"));
        assert!(output.contains(MOOD_QUESTION));
    }

    #[test]
    fn test_answers_by_number() {
        let (result, _) = run_with("1\n1\n1\n1\n5\n");
        let preference = result.expect("all answers valid");

        assert_eq!(preference.genre, "dance pop");
        assert_eq!(preference.tempo, Tempo::Fast);
        assert_eq!(preference.energy, EnergyLevel::Upbeat);
        assert_eq!(preference.instrumentation, Instrumentation::Instrumental);
        assert_eq!(preference.mood, Mood::Energetic);
    }

    #[test]
    fn test_invalid_answer_is_asked_again() {
        let (result, output) = run_with("polka\n2\nmedium\n9\nfast\nupbeat\ninstrumental\nhappy\n");
        let preference = result.expect("eventually valid");

        assert_eq!(preference.genre, "indie rock");
        assert_eq!(preference.tempo, Tempo::Fast);
        assert!(output.contains("Unknown genre `polka`. Please try again."));
        assert!(output.contains("Invalid tempo `medium`"));
        assert!(output.contains("Invalid tempo `9`"));
        assert_eq!(output.matches(TEMPO_QUESTION).count(), 3);
    }

    #[test]
    fn test_input_ending_early_is_error() {
        let (result, _) = run_with("1\nfast\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains(ENERGY_QUESTION));
    }

    #[test]
    fn test_empty_genre_list_is_error() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        assert!(run(&mut input, &mut output, &[]).is_err());
    }
}
