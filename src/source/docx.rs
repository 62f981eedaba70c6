use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

/// Body text of a `.docx` package.
///
/// Paragraphs (including those inside table cells) end with a newline,
/// `w:tab` and `w:br` become whitespace.
pub(super) fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("not a docx package: {e}"))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| format!("missing word/document.xml: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("unreadable word/document.xml: {e}"))?;
    document_xml_text(&xml)
}

fn document_xml_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_text = true;
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                b"w:tc" => out.push('\t'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| format!("bad text run: {e}"))?;
                out.push_str(&text);
            }
            Ok(_) => {}
            Err(e) => return Err(format!("malformed document.xml at {}: {e}", reader.buffer_position())),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pretty_assertions::assert_eq;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Senior Python</w:t></w:r><w:r><w:t xml:space="preserve"> engineer</w:t></w:r></w:p>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>AWS &amp; Kubernetes</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
  </w:body>
</w:document>"#;

    #[test]
    fn paragraphs_and_table_cells() {
        let text = document_xml_text(BODY).unwrap();
        assert_eq!(text.trim(), "Senior Python engineer\nAWS & Kubernetes");
    }

    #[test]
    fn reads_document_from_zip_package() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(BODY.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        let text = extract_text(buf.get_ref()).unwrap();
        assert!(text.contains("Senior Python engineer"));
        assert!(text.contains("AWS & Kubernetes"));
    }

    #[test]
    fn non_zip_bytes_fail() {
        assert!(extract_text(b"plain text").is_err());
    }
}
