use insta::assert_snapshot;
use xmlemit::{Config, ContentWriter, DocumentWriter, Error};

type Writer = DocumentWriter<Vec<u8>>;

fn render(script: impl FnOnce(&mut Writer) -> Result<(), Error>) -> String {
    let mut writer = DocumentWriter::with_config(Vec::new(), Config::new().single_quote());
    script(&mut writer).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_empty_element() {
    let xml = render(|w| {
        w.tag("element")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<element/>");
}

#[test]
fn test_version() {
    let xml = render(|w| {
        w.version("1.0")?.tag("element")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<?xml version='1.0'?><element/>");
}

#[test]
fn test_version_encoding_close() {
    let xml = render(|w| {
        w.version("1.0")?.encoding("UTF-8")?.tag("element")?.close()
    });
    assert_eq!(xml, "<?xml version='1.0' encoding='UTF-8'?><element/>");
}

#[test]
fn test_attributes_text_and_cdata() {
    let xml = render(|w| {
        w.version("1.0")?
            .encoding("UTF-8")?
            .tag("element")?
            .attribute("a", "b")?
            .xmlns("http://my/uri")?
            .text("aha<")?
            .cdata("&uuu")?
            .cdata(" f")?
            .end()?;
        Ok(())
    });
    assert_eq!(
        xml,
        "<?xml version='1.0' encoding='UTF-8'?><element a='b' xmlns='http://my/uri'>aha&lt;<![CDATA[&uuu f]]></element>"
    );
}

#[test]
fn test_attribute_then_text() {
    let xml = render(|w| {
        w.tag("a")?.attribute("x", "y")?.text("t")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a x='y'>t</a>");
}

#[test]
fn test_sibling_closes_previous_child() {
    let xml = render(|w| {
        let mut tag = w.tag("tag")?;
        tag.tag("one")?.attribute("a", "u")?.text("1")?;
        tag.tag("two")?.attribute("b", "v")?.text("2")?;
        tag.close()
    });
    assert_eq!(xml, "<tag><one a='u'>1</one><two b='v'>2</two></tag>");
}

#[test]
fn test_nested_auto_close() {
    let xml = render(|w| {
        let mut p = w.tag("p")?;
        p.tag("c1")?.text("1")?;
        p.tag("c2")?.text("2")?;
        p.close()
    });
    assert_eq!(xml, "<p><c1>1</c1><c2>2</c2></p>");
}

#[test]
fn test_close_cascades_from_depth() {
    let xml = render(|w| w.tag("a")?.tag("b")?.tag("c")?.text("x")?.close());
    assert_snapshot!(xml, @"<a><b><c>x</c></b></a>");
}

#[test]
fn test_end_returns_to_parent() {
    let xml = render(|w| {
        let mut a = w.tag("a")?;
        a.tag("b")?.end()?.text("t")?;
        a.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a><b/>t</a>");
}

#[test]
fn test_end_chain_to_document() {
    let xml = render(|w| {
        let mut a = w.tag("a")?;
        let document = a.tag("b")?.end()?.end()?;
        assert_eq!(document.depth(), 0);
        document.comment("done")?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a><b/></a><!-- done -->");
}

#[test]
fn test_namespace_prefixes() {
    let xml = render(|w| {
        w.version("1.0")?
            .encoding("UTF-8")?
            .tag_ns("fluent", "tag")?
            .xmlns_prefix("fluent", "http://api.fluent.foundation/")?
            .tag_ns("fluent", "api")?
            .close()
    });
    assert_eq!(
        xml,
        "<?xml version='1.0' encoding='UTF-8'?><fluent:tag xmlns:fluent='http://api.fluent.foundation/'><fluent:api/></fluent:tag>"
    );
}

#[test]
fn test_prefixed_attribute() {
    let xml = render(|w| {
        w.tag("doc")?
            .xmlns_prefix("x", "http://example.com/x")?
            .attribute_ns("x", "id", "1")?
            .end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<doc xmlns:x='http://example.com/x' x:id='1'/>");
}

#[test]
fn test_instructions() {
    let xml = render(|w| {
        w.version("1.0")?
            .instruction("xml-stylesheet", "href='style.css' type='text/css'")?
            .tag("root")?
            .instruction("php", "phpinfo()")?
            .close()
    });
    assert_eq!(
        xml,
        "<?xml version='1.0'?><?xml-stylesheet href='style.css' type='text/css'?><root><?php phpinfo()?></root>"
    );
}

#[test]
fn test_comments() {
    let xml = render(|w| {
        w.version("1.0")?.comment("Top level comment")?.tag("element")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<?xml version='1.0'?><!-- Top level comment --><element/>");
}

#[test]
fn test_comment_inside_element() {
    let xml = render(|w| {
        w.version("1.0")?
            .encoding("UTF-8")?
            .tag("element")?
            .comment("Comment inside element")?
            .close()
    });
    assert_eq!(
        xml,
        "<?xml version='1.0' encoding='UTF-8'?><element><!-- Comment inside element --></element>"
    );
}

#[test]
fn test_document_whitespace() {
    let xml = render(|w| {
        w.version("1.0")?.text("\n")?.tag("element")?;
        // the root is still open; trailing whitespace closes it
        w.text("\n")?;
        Ok(())
    });
    assert_eq!(xml, "<?xml version='1.0'?>\n<element/>\n");
}

#[test]
fn test_doctype_public() {
    let xml = render(|w| {
        w.doctype("html")?
            .public_id(
                "-//W3C//DTD XHTML 1.0 Strict//EN",
                "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd",
            )?
            .tag("html")?
            .close()
    });
    assert_eq!(
        xml,
        "<!DOCTYPE html PUBLIC '-//W3C//DTD XHTML 1.0 Strict//EN' 'http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd'><html/>"
    );
}

#[test]
fn test_doctype_system_after_declaration() {
    let xml = render(|w| {
        w.version("1.0")?.doctype("note")?.system_id("note.dtd")?;
        w.tag("note")?.close()
    });
    assert_snapshot!(xml, @"<?xml version='1.0'?><!DOCTYPE note SYSTEM 'note.dtd'><note/>");
}

#[test]
fn test_doctype_without_external_id() {
    let xml = render(|w| {
        w.doctype("html")?.comment("c")?.tag("html")?.close()
    });
    assert_snapshot!(xml, @"<!DOCTYPE html><!-- c --><html/>");
}

#[test]
fn test_cdata_opens_element() {
    let xml = render(|w| {
        w.tag("a")?.cdata("x")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a><![CDATA[x]]></a>");
}

#[test]
fn test_cdata_then_text() {
    let xml = render(|w| {
        w.tag("a")?.cdata("x")?.text("y")?.cdata("z")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a><![CDATA[x]]>y<![CDATA[z]]></a>");
}

#[test]
fn test_cdata_after_child() {
    let xml = render(|w| {
        let mut a = w.tag("a")?;
        a.tag("b")?;
        ContentWriter::from(a).cdata("x")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a><b/><![CDATA[x]]></a>");
}

#[test]
fn test_cdata_control_characters() {
    let xml = render(|w| {
        w.tag("a")?.cdata("a\u{1}b\tc\u{1b}")?.end()?;
        Ok(())
    });
    assert_eq!(xml, "<a><![CDATA[a b\tc ]]></a>");
}

#[test]
fn test_cdata_terminator_is_split() {
    let xml = render(|w| {
        w.tag("a")?.cdata("a]]>b")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a><![CDATA[a]]]]><![CDATA[>b]]></a>");
}

#[test]
fn test_cdata_terminator_across_calls() {
    let xml = render(|w| {
        w.tag("a")?.cdata("x]]")?.cdata(">y")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a><![CDATA[x]]]]><![CDATA[>y]]></a>");
}

#[test]
fn test_escaped_attribute() {
    let xml = render(|w| {
        w.tag("a")?.attribute("q", "'\"<&>")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a q='&apos;&quot;&lt;&amp;&gt;'/>");
}

#[test]
fn test_escaped_text_is_not_double_escaped() {
    let xml = render(|w| {
        w.tag("a")?.text("&lt; is <")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a>&amp;lt; is &lt;</a>");
}

#[test]
fn test_comment_and_instruction_verbatim() {
    let xml = render(|w| {
        w.tag("a")?.comment("<b>")?.instruction("pi", "a < b")?.end()?;
        Ok(())
    });
    assert_snapshot!(xml, @"<a><!-- <b> --><?pi a < b?></a>");
}

#[test]
fn test_double_quote_default() {
    let mut writer = DocumentWriter::new(Vec::new());
    writer
        .version("1.0")
        .unwrap()
        .tag("a")
        .unwrap()
        .attribute("x", "\"y\"")
        .unwrap()
        .close()
        .unwrap();
    let xml = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(xml, r#"<?xml version="1.0"?><a x="&quot;y&quot;"/>"#);
}

#[test]
fn test_close_is_idempotent() {
    let xml = render(|w| {
        w.tag("a")?.end()?;
        w.close()?;
        w.close()
    });
    assert_snapshot!(xml, @"<a/>");
}

#[test]
fn test_depth() {
    render(|w| {
        let mut a = w.tag("a")?;
        assert_eq!(a.depth(), 1);
        let b = a.tag("b")?;
        assert_eq!(b.depth(), 2);
        Ok(())
    });
}
