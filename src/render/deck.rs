//! Slide-deck writer: parsed slides → a PPTX package.
//!
//! A .pptx file is a zip of OOXML parts. The deck this tool emits is
//! deliberately minimal — one blank slide master/layout pair, one theme,
//! and one slide part per parsed slide, each carrying a solid background
//! fill, a title text box, and a content text box. PowerPoint and
//! LibreOffice lay the text out; we only place the shapes.
//!
//! The cover slide (index 0) gets the distinct treatment: light grey
//! background, larger centered title and content text. Every content line
//! becomes its own paragraph; a leading bullet marker (`-`, `*`, `•`)
//! selects indent level 1 and is stripped before display.
//!
//! Unlike the PDF path there is no per-line recovery here: any failure
//! while writing the package aborts the whole deck build.

use crate::error::Md2PubError;
use crate::pipeline::inline;
use crate::pipeline::slides::Slide;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// English Metric Units per inch — the coordinate space of OOXML shapes.
const EMU_PER_INCH: i64 = 914_400;

// 10 in × 7.5 in slide surface.
const SLIDE_CX: i64 = 10 * EMU_PER_INCH;
const SLIDE_CY: i64 = EMU_PER_INCH * 15 / 2;

// Title box: (0.5, 0.4) offset, 9 × 1.2 in.
const TITLE_X: i64 = EMU_PER_INCH / 2;
const TITLE_Y: i64 = EMU_PER_INCH * 2 / 5;
const TITLE_CX: i64 = 9 * EMU_PER_INCH;
const TITLE_CY: i64 = EMU_PER_INCH * 6 / 5;

// Content box: (0.7, 1.8) offset, 8.6 × 5.2 in.
const CONTENT_X: i64 = EMU_PER_INCH * 7 / 10;
const CONTENT_Y: i64 = EMU_PER_INCH * 9 / 5;
const CONTENT_CX: i64 = EMU_PER_INCH * 43 / 5;
const CONTENT_CY: i64 = EMU_PER_INCH * 26 / 5;

const DARK_SLATE: &str = "2C3E50";
const LIGHT_GREY: &str = "F5F5F5";
const WHITE: &str = "FFFFFF";

/// Outcome of one successful deck build.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct DeckReport {
    pub slides: usize,
}

/// Assemble the PPTX package for `slides` and write it to `path`.
pub fn write_deck(slides: &[Slide], path: &Path) -> Result<DeckReport, Md2PubError> {
    let fail = |detail: String| Md2PubError::DeckBuildFailed {
        path: path.to_path_buf(),
        detail,
    };

    let file = File::create(path).map_err(|e| fail(e.to_string()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    let put = |zip: &mut ZipWriter<File>, name: &str, body: String| {
        zip.start_file(name, options.clone())
            .and_then(|()| zip.write_all(body.as_bytes()).map_err(Into::into))
            .map_err(|e| fail(format!("{name}: {e}")))
    };

    put(&mut zip, "[Content_Types].xml", content_types_xml(slides.len()))?;
    put(&mut zip, "_rels/.rels", ROOT_RELS.to_string())?;
    put(&mut zip, "ppt/presentation.xml", presentation_xml(slides.len()))?;
    put(
        &mut zip,
        "ppt/_rels/presentation.xml.rels",
        presentation_rels_xml(slides.len()),
    )?;
    put(&mut zip, "ppt/slideMasters/slideMaster1.xml", MASTER_XML.to_string())?;
    put(
        &mut zip,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        MASTER_RELS.to_string(),
    )?;
    put(&mut zip, "ppt/slideLayouts/slideLayout1.xml", LAYOUT_XML.to_string())?;
    put(
        &mut zip,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        LAYOUT_RELS.to_string(),
    )?;
    put(&mut zip, "ppt/theme/theme1.xml", THEME_XML.to_string())?;

    for (idx, slide) in slides.iter().enumerate() {
        let n = idx + 1;
        put(
            &mut zip,
            &format!("ppt/slides/slide{n}.xml"),
            slide_xml(slide, idx == 0),
        )?;
        put(
            &mut zip,
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            SLIDE_RELS.to_string(),
        )?;
    }

    zip.finish().map_err(|e| fail(e.to_string()))?;
    debug!("wrote {} ({} slides)", path.display(), slides.len());
    Ok(DeckReport {
        slides: slides.len(),
    })
}

/// Escape text for an XML text node or attribute value.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_bullet_marker(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('*') || line.starts_with('\u{2022}')
}

/// Build one slide part. The cover slide uses the larger, centered styling
/// and the light grey background fill.
fn slide_xml(slide: &Slide, cover: bool) -> String {
    let bg = if cover { LIGHT_GREY } else { WHITE };
    let title_size = if cover { 3600 } else { 3200 };
    let content_size = if cover { 1800 } else { 1600 };

    let mut content_paras = String::new();
    for raw in slide.content.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line = inline::strip_markup(line);
        let (level, text) = if is_bullet_marker(&line) {
            (1, line.trim_start_matches(['-', '*', '\u{2022}', ' ']).trim())
        } else {
            (0, line.as_str())
        };
        let algn = if cover { r#" algn="ctr""# } else { "" };
        content_paras.push_str(&format!(
            concat!(
                r#"<a:p><a:pPr lvl="{lvl}"{algn}><a:spcAft><a:spcPts val="1200"/></a:spcAft></a:pPr>"#,
                r#"<a:r><a:rPr lang="en-US" sz="{sz}" dirty="0">"#,
                r#"<a:solidFill><a:srgbClr val="{color}"/></a:solidFill></a:rPr>"#,
                r#"<a:t>{text}</a:t></a:r></a:p>"#
            ),
            lvl = level,
            algn = algn,
            sz = content_size,
            color = DARK_SLATE,
            text = escape_xml(text),
        ));
    }
    if content_paras.is_empty() {
        content_paras.push_str("<a:p/>");
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
            r#"<p:cSld>"#,
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{bg}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            r#"<p:spTree>"#,
            r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
            // Title text box
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr><a:xfrm><a:off x="{tx}" y="{ty}"/><a:ext cx="{tcx}" cy="{tcy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
            r#"<p:txBody><a:bodyPr wrap="square"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#,
            r#"<a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="en-US" sz="{tsz}" b="1" dirty="0">"#,
            r#"<a:solidFill><a:srgbClr val="{tcolor}"/></a:solidFill></a:rPr>"#,
            r#"<a:t>{title}</a:t></a:r></a:p></p:txBody></p:sp>"#,
            // Content text box
            r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr><a:xfrm><a:off x="{cx}" y="{cy}"/><a:ext cx="{ccx}" cy="{ccy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
            r#"<p:txBody><a:bodyPr wrap="square" anchor="t"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#,
            r#"{content}</p:txBody></p:sp>"#,
            r#"</p:spTree></p:cSld>"#,
            r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
        ),
        bg = bg,
        tx = TITLE_X,
        ty = TITLE_Y,
        tcx = TITLE_CX,
        tcy = TITLE_CY,
        tsz = title_size,
        tcolor = DARK_SLATE,
        title = escape_xml(&slide.title),
        cx = CONTENT_X,
        cy = CONTENT_Y,
        ccx = CONTENT_CX,
        ccy = CONTENT_CY,
        content = content_paras,
    )
}

fn content_types_xml(slide_count: usize) -> String {
    let mut overrides = String::new();
    for n in 1..=slide_count {
        overrides.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
    }
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#,
            r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#,
            r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
            r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
            "{overrides}</Types>"
        ),
        overrides = overrides
    )
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for n in 1..=slide_count {
        // rId1 is the master; slides start at rId2.
        slide_ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            255 + n,
            n + 1
        ));
    }
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
            r#"<p:sldIdLst>{ids}</p:sldIdLst>"#,
            r#"<p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="{cy}" cy="{cx}"/>"#,
            r#"</p:presentation>"#
        ),
        ids = slide_ids,
        cx = SLIDE_CX,
        cy = SLIDE_CY,
    )
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut rels = String::from(
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
    );
    for n in 1..=slide_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{n}.xml"/>"#,
            n + 1
        ));
    }
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        ),
        rels = rels
    )
}

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>"#,
    r#"</Relationships>"#
);

const SLIDE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
    r#"</Relationships>"#
);

const MASTER_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    r#"<p:cSld><p:spTree>"#,
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
    r#"</p:spTree></p:cSld>"#,
    r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
    r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
    r#"</p:sldMaster>"#
);

const MASTER_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>"#,
    r#"</Relationships>"#
);

const LAYOUT_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1">"#,
    r#"<p:cSld name="Blank"><p:spTree>"#,
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
    r#"</p:spTree></p:cSld>"#,
    r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
);

const LAYOUT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>"#,
    r#"</Relationships>"#
);

/// The smallest theme PowerPoint accepts: one colour scheme, one font
/// scheme, and the three-entry format scheme lists the schema requires.
const THEME_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="md2pub">"#,
    r#"<a:themeElements>"#,
    r#"<a:clrScheme name="md2pub">"#,
    r#"<a:dk1><a:srgbClr val="2C3E50"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>"#,
    r#"<a:dk2><a:srgbClr val="34495E"/></a:dk2><a:lt2><a:srgbClr val="F5F5F5"/></a:lt2>"#,
    r#"<a:accent1><a:srgbClr val="F39C12"/></a:accent1><a:accent2><a:srgbClr val="2980B9"/></a:accent2>"#,
    r#"<a:accent3><a:srgbClr val="27AE60"/></a:accent3><a:accent4><a:srgbClr val="8E44AD"/></a:accent4>"#,
    r#"<a:accent5><a:srgbClr val="C0392B"/></a:accent5><a:accent6><a:srgbClr val="16A085"/></a:accent6>"#,
    r#"<a:hlink><a:srgbClr val="2980B9"/></a:hlink><a:folHlink><a:srgbClr val="8E44AD"/></a:folHlink>"#,
    r#"</a:clrScheme>"#,
    r#"<a:fontScheme name="md2pub">"#,
    r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
    r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
    r#"</a:fontScheme>"#,
    r#"<a:fmtScheme name="md2pub">"#,
    r#"<a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst>"#,
    r#"<a:lnStyleLst><a:ln><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst>"#,
    r#"<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
    r#"<a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>"#,
    r#"<a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst>"#,
    r#"</a:fmtScheme></a:themeElements></a:theme>"#
);
