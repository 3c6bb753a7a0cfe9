//! # Expo Converter
//!
//! Rewrites React web components into Expo / React Native components by mutating
//! the oxc syntax tree of the input file.
//!
//! ## Pass Order
//!
//! 1. **Combined rewrite**: imports, markup, hook bindings and storage calls in
//!    one traversal (they touch disjoint node kinds).
//! 2. **Stylesheet**: the `styles` table is consumed and re-emitted as a
//!    `StyleSheet.create(...)` binding at the end of the program.
//! 3. **Injectors**: leading imports, the type declaration, font loading.
//! 4. **Reconciler**: platform imports for every component the final tree uses.
//!
//! ## Binding-Name Contract
//!
//! Names one pass introduces and another relies on (`router`, `styles`,
//! `SecureStore`, ...) live in [`config::WellKnownNames`]. Passes never spell them.
//!
//! ## Failure
//!
//! A run either returns the full output or an error. Nothing is written on failure.

#[cfg(feature = "napi")]
use napi_derive::napi;

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_ast::AstBuilder;
use oxc_ast_visit::VisitMut;
use serde::Serialize;

pub mod codegen;
pub mod components;
pub mod config;
pub mod error;
pub mod hooks;
pub mod imports;
pub mod inject;
pub mod markup;
mod nodes;
pub mod parse;
pub mod style;
pub mod stylesheet;
mod template;
pub mod traverse;

#[cfg(test)]
mod markup_tests;

pub use config::{ConversionTables, ConverterConfig, WellKnownNames};
pub use error::{ConvertError, Result, StructuralError};
pub use style::{StyleMap, StyleValue};

use crate::codegen::print_module;
use crate::parse::parse_module;
use crate::traverse::RewritePass;

/// Which part of the pipeline a run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertMode {
    Full,
    Imports,
    Styles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOutput {
    pub code: String,
    /// Platform names the output imports from the platform UI module (full mode only)
    pub used_components: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// PIPELINE
// ═══════════════════════════════════════════════════════════════════════════════

fn run_full<'a>(
    ast: AstBuilder<'a>,
    config: &ConverterConfig,
    program: &mut Program<'a>,
) -> Result<Vec<String>> {
    let aliases = hooks::collect_navigation_aliases(program, &config.names);
    let mut pass = RewritePass::new(ast, config, aliases);
    pass.visit_program(program);
    let stats = pass.finish()?;
    tracing::debug!(?stats, "combined rewrite done");

    let outcome = stylesheet::generate_stylesheet(ast, config, program)?;
    tracing::debug!(?outcome, "stylesheet done");

    inject::ensure_leading_imports(ast, config, program)?;
    inject::insert_type_declaration(ast, config, program)?;
    let fonts = inject::insert_font_loading(ast, config, program)?;
    tracing::debug!(fonts, "injectors done");

    let used = components::collect_used_components(program, config);
    components::ensure_platform_imports(ast, config, program, &used)?;
    Ok(used)
}

fn run_mode(source: &str, file_name: &str, config: &ConverterConfig, mode: ConvertMode) -> Result<ConversionOutput> {
    let allocator = Allocator::default();
    let mut program = parse_module(&allocator, source, file_name)?;
    let ast = AstBuilder::new(&allocator);

    let used_components = match mode {
        ConvertMode::Full => run_full(ast, config, &mut program)?,
        ConvertMode::Imports => {
            imports::rewrite_program_imports(ast, config, &mut program)?;
            Vec::new()
        }
        ConvertMode::Styles => {
            stylesheet::generate_stylesheet(ast, config, &mut program)?;
            Vec::new()
        }
    };

    let code = print_module(&program);
    tracing::info!(file = file_name, ?mode, components = used_components.len(), "converted");
    Ok(ConversionOutput {
        code,
        used_components,
    })
}

/// Full conversion of one source file.
pub fn convert_source(source: &str, file_name: &str, config: &ConverterConfig) -> Result<ConversionOutput> {
    run_mode(source, file_name, config, ConvertMode::Full)
}

/// Import Rewriter only.
pub fn convert_imports(source: &str, file_name: &str, config: &ConverterConfig) -> Result<ConversionOutput> {
    run_mode(source, file_name, config, ConvertMode::Imports)
}

/// StyleSheet Generator only.
pub fn convert_styles(source: &str, file_name: &str, config: &ConverterConfig) -> Result<ConversionOutput> {
    run_mode(source, file_name, config, ConvertMode::Styles)
}

/// Evaluated `styles` table of `source`, without rewriting anything.
pub fn extract_style_table(
    source: &str,
    file_name: &str,
    config: &ConverterConfig,
) -> Result<StyleMap<StyleMap<StyleValue>>> {
    let allocator = Allocator::default();
    let program = parse_module(&allocator, source, file_name)?;
    Ok(stylesheet::extract_style_table(config, &program))
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert `input` into `output`. The output file is only written when the run succeeds.
pub fn convert_file(
    input: &Path,
    output: &Path,
    mode: ConvertMode,
    config: &ConverterConfig,
) -> Result<ConversionOutput> {
    let source = read_source(input)?;
    let file_name = input.display().to_string();
    let result = run_mode(&source, &file_name, config, mode)?;
    std::fs::write(output, &result.code).map_err(|source| ConvertError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(result)
}

/// Read the styles table of `input` in evaluated form.
pub fn extract_style_table_file(input: &Path, config: &ConverterConfig) -> Result<StyleMap<StyleMap<StyleValue>>> {
    let source = read_source(input)?;
    extract_style_table(&source, &input.display().to_string(), config)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODE BINDING
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn convert_native(source: String, file_name: String) -> napi::Result<String> {
    let output = convert_source(&source, &file_name, &ConverterConfig::default())
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;
    serde_json::to_string(&output)
        .map_err(|e| napi::Error::from_reason(format!("Serialize error: {}", e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use oxc_allocator::Allocator;
    use oxc_ast::ast::Program;
    use oxc_ast::AstBuilder;

    use crate::codegen::print_module;
    use crate::error::Result;
    use crate::parse::parse_module;

    /// Whitespace-free, double-quoted form of `code` for layout-independent comparison.
    pub fn squash(code: &str) -> String {
        code.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '\'' { '"' } else { c })
            .collect()
    }

    /// Parse `source`, run `pass` over it and return the squashed printed result.
    pub fn transform<F>(source: &str, pass: F) -> Result<String>
    where
        F: for<'a> FnOnce(AstBuilder<'a>, &mut Program<'a>) -> Result<()>,
    {
        let allocator = Allocator::default();
        let mut program = parse_module(&allocator, source, "test.tsx")?;
        pass(AstBuilder::new(&allocator), &mut program)?;
        Ok(squash(&print_module(&program)))
    }
}
