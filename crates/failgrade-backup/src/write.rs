use crate::{QuizBackup, Result, subplugin_element_name};
use failgrade_types::ids;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Render `entries` as a backup document. Several quizzes are wrapped in `<activities>`.
pub fn write_backup(entries: &[QuizBackup]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let wrap = entries.len() != 1;
    if wrap {
        writer.write_event(Event::Start(BytesStart::new("activities")))?;
    }
    for entry in entries {
        write_quiz(&mut writer, entry)?;
    }
    if wrap {
        writer.write_event(Event::End(BytesEnd::new("activities")))?;
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_quiz(writer: &mut Writer<Vec<u8>>, entry: &QuizBackup) -> Result<()> {
    let id = entry.activity_id.0.to_string();
    let wrapper = subplugin_element_name();

    writer.write_event(Event::Start(
        BytesStart::new("quiz").with_attributes([("id", id.as_str())]),
    ))?;

    match entry.enabled {
        None => {
            writer.write_event(Event::Empty(BytesStart::new(wrapper.as_str())))?;
        }
        Some(enabled) => {
            writer.write_event(Event::Start(BytesStart::new(wrapper.as_str())))?;
            writer.write_event(Event::Start(BytesStart::new(ids::BACKUP_ELEMENT)))?;
            writer.write_event(Event::Start(BytesStart::new(ids::FIELD_ENABLED)))?;
            writer.write_event(Event::Text(BytesText::new(if enabled { "1" } else { "0" })))?;
            writer.write_event(Event::End(BytesEnd::new(ids::FIELD_ENABLED)))?;
            writer.write_event(Event::End(BytesEnd::new(ids::BACKUP_ELEMENT)))?;
            writer.write_event(Event::End(BytesEnd::new(wrapper.as_str())))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("quiz")))?;
    Ok(())
}
