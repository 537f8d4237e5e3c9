//! Glif format 2 encoding.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Contour, ContourPoint, Glyph, PointType};
use crate::error::GlifWriteError;

const GLIF_FORMAT: &str = "2";

type GlifWriter = Writer<Cursor<Vec<u8>>>;

impl Glyph {
    pub(crate) fn encode_xml(&self) -> Result<Vec<u8>, GlifWriteError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b'\t', 1);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let root = BytesStart::new("glyph")
            .with_attributes([("name", self.name.as_str()), ("format", GLIF_FORMAT)]);
        writer.write_event(Event::Start(root))?;
        self.write_body(&mut writer)?;
        writer.write_event(Event::End(BytesEnd::new("glyph")))?;

        let mut buf = writer.into_inner().into_inner();
        buf.write_all(b"\n")?;
        Ok(buf)
    }

    fn write_body(&self, writer: &mut GlifWriter) -> Result<(), GlifWriteError> {
        let width = self.width.to_string();
        writer.write_event(Event::Empty(
            BytesStart::new("advance").with_attributes([("width", width.as_str())]),
        ))?;

        for &ch in &self.codepoints {
            let hex = format!("{:04X}", u32::from(ch));
            writer.write_event(Event::Empty(
                BytesStart::new("unicode").with_attributes([("hex", hex.as_str())]),
            ))?;
        }

        if let Some(note) = &self.note {
            writer.write_event(Event::Start(BytesStart::new("note")))?;
            writer.write_event(Event::Text(BytesText::new(note)))?;
            writer.write_event(Event::End(BytesEnd::new("note")))?;
        }

        if self.contours.is_empty() {
            return Ok(());
        }
        writer.write_event(Event::Start(BytesStart::new("outline")))?;
        for contour in &self.contours {
            contour.write_xml(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new("outline")))?;
        Ok(())
    }
}

impl Contour {
    fn write_xml(&self, writer: &mut GlifWriter) -> Result<(), GlifWriteError> {
        writer.write_event(Event::Start(BytesStart::new("contour")))?;
        for point in &self.points {
            writer.write_event(Event::Empty(point.to_element()))?;
        }
        writer.write_event(Event::End(BytesEnd::new("contour")))?;
        Ok(())
    }
}

impl ContourPoint {
    fn to_element(&self) -> BytesStart<'static> {
        let (x, y) = (self.x.to_string(), self.y.to_string());
        let mut element = BytesStart::new("point");
        element.extend_attributes([("x", x.as_str()), ("y", y.as_str())]);
        // a missing type means offcurve
        if self.typ != PointType::OffCurve {
            element.push_attribute(("type", self.typ.as_str()));
        }
        if self.smooth {
            element.push_attribute(("smooth", "yes"));
        }
        element
    }
}
