use crate::{BackupError, QuizBackup, Result};
use failgrade_types::{QuizId, ids};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse every `<quiz>` in a backup document.
///
/// The switch is read from a `failgradeenabled` child element, or from an attribute of
/// the same name on `<quizaccess_failgrade>`.
pub fn read_backup(xml: &str) -> Result<Vec<QuizBackup>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut out = Vec::new();
    let mut quiz: Option<QuizBackup> = None;
    let mut in_setting = false;
    let mut in_field = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"quiz" => quiz = Some(open_quiz(&e)?),
                name if name == ids::BACKUP_ELEMENT.as_bytes() => {
                    open_setting(&mut quiz, &e)?;
                    in_setting = true;
                }
                name if name == ids::FIELD_ENABLED.as_bytes() && in_setting => in_field = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"quiz" => out.push(open_quiz(&e)?),
                name if name == ids::BACKUP_ELEMENT.as_bytes() => {
                    open_setting(&mut quiz, &e)?;
                    close_setting(&quiz)?;
                }
                _ => {}
            },
            Event::Text(t) if in_field => {
                let text = t.unescape().map_err(quick_xml::Error::from)?;
                let entry = quiz.as_mut().ok_or(BackupError::Misplaced(ids::FIELD_ENABLED))?;
                entry.enabled = Some(parse_flag(text.trim())?);
            }
            Event::End(e) => match e.name().as_ref() {
                b"quiz" => {
                    if let Some(entry) = quiz.take() {
                        out.push(entry);
                    }
                }
                name if name == ids::BACKUP_ELEMENT.as_bytes() => {
                    in_setting = false;
                    close_setting(&quiz)?;
                }
                name if name == ids::FIELD_ENABLED.as_bytes() => in_field = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn open_quiz(e: &BytesStart<'_>) -> Result<QuizBackup> {
    let attr = e
        .try_get_attribute("id")
        .map_err(quick_xml::Error::from)?
        .ok_or(BackupError::Missing {
            element: "quiz",
            what: "an id attribute",
        })?;
    let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
    let id = value
        .trim()
        .parse::<i64>()
        .map_err(|_| BackupError::InvalidValue {
            field: "quiz id",
            value: value.to_string(),
        })?;
    Ok(QuizBackup {
        activity_id: QuizId(id),
        enabled: None,
    })
}

fn open_setting(quiz: &mut Option<QuizBackup>, e: &BytesStart<'_>) -> Result<()> {
    let entry = quiz
        .as_mut()
        .ok_or(BackupError::Misplaced(ids::BACKUP_ELEMENT))?;
    if let Some(attr) = e
        .try_get_attribute(ids::FIELD_ENABLED)
        .map_err(quick_xml::Error::from)?
    {
        let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
        entry.enabled = Some(parse_flag(value.trim())?);
    }
    Ok(())
}

fn close_setting(quiz: &Option<QuizBackup>) -> Result<()> {
    match quiz {
        Some(QuizBackup {
            enabled: Some(_), ..
        }) => Ok(()),
        Some(_) => Err(BackupError::Missing {
            element: ids::BACKUP_ELEMENT,
            what: "a failgradeenabled value",
        }),
        None => Err(BackupError::Misplaced(ids::BACKUP_ELEMENT)),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(BackupError::InvalidValue {
            field: ids::FIELD_ENABLED,
            value: other.to_string(),
        }),
    }
}
