#[cfg(test)]
mod tests {
    use oxc_ast::ast::*;
    use oxc_ast::AstBuilder;
    use oxc_ast_visit::{walk_mut, VisitMut};

    use crate::config::ConverterConfig;
    use crate::error::{Result, ERR_DYNAMIC_CLASS_LIST, ERR_TAG_MISMATCH};
    use crate::markup::{element_name_text, transform_element};
    use crate::nodes::alloc_name;
    use crate::test_support::{squash, transform};

    struct Elements<'c, 'a> {
        ast: AstBuilder<'a>,
        config: &'c ConverterConfig,
        result: Result<()>,
    }

    impl<'c, 'a> VisitMut<'a> for Elements<'c, 'a> {
        fn visit_jsx_element(&mut self, element: &mut JSXElement<'a>) {
            if self.result.is_ok() {
                self.result = transform_element(self.ast, self.config, element);
            }
            walk_mut::walk_jsx_element(self, element);
        }
    }

    fn markup(source: &str) -> Result<String> {
        let config = ConverterConfig::default();
        transform(source, |ast, program| {
            let mut pass = Elements {
                ast,
                config: &config,
                result: Ok(()),
            };
            pass.visit_program(program);
            pass.result
        })
    }

    #[test]
    fn test_every_web_tag_maps_on_both_ends() {
        for (web, platform) in [
            ("div", "View"),
            ("button", "TouchableOpacity"),
            ("img", "Image"),
            ("span", "Text"),
            ("input", "TextInput"),
        ] {
            let out = markup(&format!("const a = <{0}>x</{0}>;", web)).unwrap();
            assert_eq!(out, squash(&format!("const a = <{0}>x</{0}>;", platform)), "{}", web);
        }
    }

    #[test]
    fn test_self_closing_and_unknown_tags() {
        let out = markup("const a = <section><img /><Custom /></section>;").unwrap();
        assert_eq!(out, squash("const a = <section><Image /><Custom /></section>;"));
    }

    #[test]
    fn test_single_class_becomes_member_reference() {
        let out = markup(r#"const a = <div className="box">hi</div>;"#).unwrap();
        assert_eq!(out, squash("const a = <View style={styles.Box}>hi</View>;"));
    }

    #[test]
    fn test_multiple_classes_become_ordered_list() {
        let out = markup(r#"const a = <span className=" title  bold dark ">t</span>;"#).unwrap();
        assert_eq!(
            out,
            squash("const a = <Text style={[styles.Title, styles.Bold, styles.Dark]}>t</Text>;")
        );
    }

    #[test]
    fn test_non_identifier_class_uses_computed_member() {
        let out = markup(r#"const a = <div className="main-box" />;"#).unwrap();
        assert_eq!(out, squash(r#"const a = <View style={styles["Main-box"]} />;"#));
    }

    #[test]
    fn test_static_class_expressions_accepted() {
        let out = markup("const a = <div className={'a b'} />; const b = <div className={`c`} />;")
            .unwrap();
        assert_eq!(
            out,
            squash("const a = <View style={[styles.A, styles.B]} />; const b = <View style={styles.C} />;")
        );
    }

    #[test]
    fn test_empty_class_list_drops_attribute() {
        let out = markup(r#"const a = <div id="x" className="  " />;"#).unwrap();
        assert_eq!(out, squash(r#"const a = <View id="x" />;"#));
    }

    #[test]
    fn test_dynamic_class_list_is_structural_error() {
        let err = markup("const a = <div className={active ? 'a' : 'b'} />;").unwrap_err();
        assert_eq!(err.code(), Some(ERR_DYNAMIC_CLASS_LIST));

        let err = markup("const a = <div className={`x ${y}`} />;").unwrap_err();
        assert_eq!(err.code(), Some(ERR_DYNAMIC_CLASS_LIST));
    }

    #[test]
    fn test_click_becomes_press_only_on_pressable() {
        let out = markup("const a = <button onClick={go}>b</button>; const b = <div onClick={go} />;")
            .unwrap();
        assert_eq!(
            out,
            squash(
                "const a = <TouchableOpacity onPress={go}>b</TouchableOpacity>; const b = <View onClick={go} />;"
            )
        );
    }

    #[test]
    fn test_change_becomes_change_text_only_on_text_input() {
        let out = markup("const a = <input onChange={set} />; const b = <span onChange={set} />;")
            .unwrap();
        assert_eq!(
            out,
            squash("const a = <TextInput onChangeText={set} />; const b = <Text onChange={set} />;")
        );
    }

    #[test]
    fn test_platform_tags_keep_web_event_names() {
        let out = markup(
            "const a = <TouchableOpacity onClick={go}>x</TouchableOpacity>; const b = <TextInput onChange={set} />;",
        )
        .unwrap();
        assert_eq!(
            out,
            squash(
                "const a = <TouchableOpacity onClick={go}>x</TouchableOpacity>; const b = <TextInput onChange={set} />;"
            )
        );
    }

    #[test]
    fn test_other_attributes_pass_through() {
        let out = markup(r#"const a = <img src={logo} alt="Logo" {...rest} />;"#).unwrap();
        assert_eq!(out, squash(r#"const a = <Image src={logo} alt="Logo" {...rest} />;"#));
    }

    #[test]
    fn test_mismatched_closing_tag_is_structural_error() {
        struct BreakClosing<'a> {
            ast: AstBuilder<'a>,
        }
        impl<'a> VisitMut<'a> for BreakClosing<'a> {
            fn visit_jsx_closing_element(&mut self, closing: &mut JSXClosingElement<'a>) {
                if let JSXElementName::Identifier(id) = &mut closing.name {
                    id.name = alloc_name(self.ast, "span").into();
                }
            }
        }

        let config = ConverterConfig::default();
        let err = transform("const a = <div>x</div>;", |ast, program| {
            BreakClosing { ast }.visit_program(program);
            let mut pass = Elements {
                ast,
                config: &config,
                result: Ok(()),
            };
            pass.visit_program(program);
            pass.result
        })
        .unwrap_err();
        assert_eq!(err.code(), Some(ERR_TAG_MISMATCH));
        assert!(err.to_string().contains("<div> is closed by </span>"));
    }

    #[test]
    fn test_element_name_text_variants() {
        let mut seen = Vec::new();
        transform("const a = <ui.Card.Title><svg:path /></ui.Card.Title>;", |_, program| {
            struct Names<'s> {
                seen: &'s mut Vec<String>,
            }
            impl<'s, 'a> VisitMut<'a> for Names<'s> {
                fn visit_jsx_opening_element(&mut self, el: &mut JSXOpeningElement<'a>) {
                    self.seen.push(element_name_text(&el.name));
                    walk_mut::walk_jsx_opening_element(self, el);
                }
            }
            Names { seen: &mut seen }.visit_program(program);
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec!["ui.Card.Title", "svg:path"]);
    }
}
