//! Line-oriented source scanner.
//!
//! One pass over the file's lines drives a small state machine: brace
//! counting delimits declaration bodies, doc blocks are parsed as they
//! are found and queued until the next declaration consumes them, and
//! every recognized header becomes a structural entity on the File
//! record. Input the patterns do not model is skipped, counted and
//! logged; a scan never fails on unrecognized syntax.
//!
//! The depth bookkeeping assumes at most one net brace transition per
//! physical line. One-line bodies (`function f(){ return 1; }`) miscount
//! and can close the enclosing type early; this matches the upstream
//! behavior and is pinned by tests rather than patched over.

use crate::config::ScanConfig;
use crate::decorator::{
    decorate_class, decorate_file, decorate_function, decorate_interface, decorate_method,
    decorate_trait,
};
use crate::docblock::{parse_doc_block, DocBlock};
use crate::errors::ParserResult;
use crate::metrics::ScanMetrics;
use crate::patterns::{
    classify, is_doc_close, parse_parameter_fragment, strip_line_comment, FunctionHeader,
    LineToken, MemberDecl, TypeHeader, TypeKind, VarAnnotation,
};
use log::{debug, trace};
use phpoutline_model::{
    ClassEntity, FileEntity, FunctionEntity, InterfaceEntity, Member, MethodEntity, Parameter,
    ReturnValue, TraitEntity,
};
use std::collections::{HashMap, VecDeque};

/// The class/interface/trait currently being populated.
enum TypeDecl {
    Class(ClassEntity),
    Interface(InterfaceEntity),
    Trait(TraitEntity),
}

impl TypeDecl {
    fn name(&self) -> &str {
        match self {
            TypeDecl::Class(class) => &class.name,
            TypeDecl::Interface(interface) => &interface.name,
            TypeDecl::Trait(trait_entity) => &trait_entity.name,
        }
    }

    fn set_method(&mut self, method: MethodEntity) -> ParserResult<()> {
        match self {
            TypeDecl::Class(class) => class.set_method(method)?,
            TypeDecl::Interface(interface) => interface.set_method(method)?,
            TypeDecl::Trait(trait_entity) => trait_entity.set_method(method)?,
        }
        Ok(())
    }

    fn add_used_trait(&mut self, name: String) {
        match self {
            TypeDecl::Class(class) => class.add_used_trait(name),
            TypeDecl::Trait(trait_entity) => trait_entity.add_used_trait(name),
            // Interfaces cannot use traits
            TypeDecl::Interface(interface) => {
                debug!("interface '{}' cannot use trait '{}'", interface.name, name);
            }
        }
    }
}

/// Scanner state for one file.
///
/// Owns fully private state; independent files can be scanned by
/// independent scanners with nothing shared.
pub struct Scanner {
    config: ScanConfig,
    /// Brace nesting depth; may go negative on unbalanced input
    depth: i64,
    /// 1-indexed current line
    line_number: usize,
    /// Inside an open class/interface/trait body
    inside_type: bool,
    /// A type header has been seen at some point in this file
    seen_any_type: bool,
    /// The file-level doc block has been claimed
    file_block_claimed: bool,
    current_type: Option<TypeDecl>,
    /// Name of the method whose body is being captured
    current_method: Option<String>,
    /// Captured body lines per method name
    bodies: HashMap<String, Vec<String>>,
    /// Parsed doc blocks waiting for the next declaration
    open_blocks: Vec<DocBlock>,
    /// Pending `@var` descriptors keyed `Type::member` (bare name when
    /// outside a type)
    var_blocks: HashMap<String, Member>,
    metrics: ScanMetrics,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            depth: 0,
            line_number: 0,
            inside_type: false,
            seen_any_type: false,
            file_block_claimed: false,
            current_type: None,
            current_method: None,
            bodies: HashMap::new(),
            open_blocks: Vec::new(),
            var_blocks: HashMap::new(),
            metrics: ScanMetrics::default(),
        }
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Scan `source` and populate `file` with every declaration found.
    pub fn scan(&mut self, source: &str, file: &mut FileEntity) -> ParserResult<()> {
        let mut queue: VecDeque<&str> = source.lines().collect();

        while let Some(raw) = queue.pop_front() {
            self.line_number += 1;
            self.metrics.lines_scanned += 1;

            let stripped_line = strip_line_comment(raw);
            let stripped = stripped_line.trim();
            let token = classify(stripped);

            if matches!(token, LineToken::PhpTag) {
                continue;
            }

            // A closing brace takes effect before the line is processed,
            // an opening brace after; a line doing both nets to zero.
            if stripped.ends_with('}') {
                self.depth -= 1;
            }

            if matches!(token, LineToken::DocBlockOpen) && self.depth < 2 {
                self.consume_doc_block(stripped, &mut queue, file);
                continue;
            }

            let is_type_header = matches!(token, LineToken::TypeHeader(_));

            if !self.inside_type {
                self.process_top_level(token, stripped, file)?;
            } else if self.process_in_type(token, raw, &mut queue, file)? {
                // Header pushed back for reprocessing; skip the brace
                // bookkeeping for this occurrence of the line.
                continue;
            }

            if stripped.ends_with('{') {
                self.depth += 1;
            }
            if self.depth < 1 && !is_type_header {
                self.inside_type = false;
            }
        }

        if let Some(finished) = self.current_type.take() {
            self.attach_type(file, finished);
        }
        if self.config.include_source {
            file.source_code = Some(source.to_string());
        }
        Ok(())
    }

    /// Greedily consume a `/** ... */` block, parse it and queue it. The
    /// closing line goes back on the queue for regular processing.
    fn consume_doc_block(
        &mut self,
        open_line: &str,
        queue: &mut VecDeque<&str>,
        file: &mut FileEntity,
    ) {
        let mut lines = vec![open_line.to_string()];
        while let Some(next) = queue.pop_front() {
            let trimmed = next.trim();
            if is_doc_close(trimmed) {
                queue.push_front(next);
                break;
            }
            self.line_number += 1;
            self.metrics.lines_scanned += 1;
            lines.push(trimmed.to_string());
        }

        let block = parse_doc_block(&lines);
        self.metrics.doc_blocks += 1;
        self.open_blocks.push(block);

        // The first block of the file, before any type, documents the
        // file itself. It stays queued: by PHP convention the file block
        // and the first declaration's block may be one and the same.
        if !self.file_block_claimed && !self.seen_any_type {
            self.file_block_claimed = true;
            if let Some(block) = self.open_blocks.last().cloned() {
                decorate_file(file, &block);
            }
        }
    }

    fn process_top_level(
        &mut self,
        token: LineToken,
        stripped: &str,
        file: &mut FileEntity,
    ) -> ParserResult<()> {
        match token {
            LineToken::TypeHeader(header) => {
                // A previous type may be closed but not yet attached;
                // flush it so it is not overwritten and lost.
                if let Some(finished) = self.current_type.take() {
                    self.attach_type(file, finished);
                }
                let decl = self.build_type(file, header)?;
                self.current_type = Some(decl);
                self.inside_type = true;
                self.seen_any_type = true;
            }
            LineToken::FunctionHeader(header) => {
                let function = self.build_function(header);
                trace!("line {}: function '{}'", self.line_number, function.name);
                self.metrics.functions_found += 1;
                file.set_function(function);
            }
            LineToken::Namespace(namespace) => {
                file.namespace = Some(namespace);
            }
            LineToken::VarAnnotation(var) => {
                self.var_blocks
                    .insert(var.name.clone(), member_from_annotation(&var));
            }
            LineToken::MemberDecl(member) => {
                debug!(
                    "line {}: member '${}' outside any type, skipped",
                    self.line_number, member.name
                );
            }
            LineToken::Plain => {
                if self.depth <= 1 {
                    self.note_unrecognized(stripped);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle a line inside an open type body. Returns `true` when the
    /// line was pushed back and the caller must restart the loop.
    fn process_in_type<'a>(
        &mut self,
        token: LineToken,
        raw: &'a str,
        queue: &mut VecDeque<&'a str>,
        file: &mut FileEntity,
    ) -> ParserResult<bool> {
        match token {
            LineToken::TypeHeader(_) => {
                // A new header while a body is open means the previous
                // body ended without the scanner seeing it. Flush, then
                // reprocess the header from a clean depth.
                if let Some(finished) = self.current_type.take() {
                    self.attach_type(file, finished);
                }
                queue.push_front(raw);
                self.line_number -= 1;
                self.metrics.lines_scanned -= 1;
                self.inside_type = false;
                self.depth = 0;
                return Ok(true);
            }
            LineToken::TraitUse(names) => {
                if let Some(ref mut decl) = self.current_type {
                    for name in names {
                        decl.add_used_trait(name);
                    }
                }
            }
            LineToken::FunctionHeader(header) => {
                let name = header.name.clone();
                let method = self.build_method(header);
                trace!("line {}: method '{}'", self.line_number, name);
                self.metrics.methods_found += 1;
                if let Some(ref mut decl) = self.current_type {
                    decl.set_method(method)?;
                }
                self.current_method = Some(name);
            }
            other if self.depth <= 1 => match other {
                LineToken::VarAnnotation(var) => {
                    let key = match self.current_type {
                        Some(ref decl) => format!("{}::{}", decl.name(), var.name),
                        None => var.name.clone(),
                    };
                    self.var_blocks.insert(key, member_from_annotation(&var));
                }
                LineToken::MemberDecl(member) => {
                    self.handle_member(member)?;
                }
                LineToken::Plain => self.note_unrecognized(stripped_of(raw)),
                _ => {}
            },
            _ => {
                // Inside a method body: capture the raw line verbatim.
                if self.config.capture_bodies {
                    if let Some(ref name) = self.current_method {
                        self.bodies
                            .entry(name.clone())
                            .or_default()
                            .push(raw.to_string());
                    }
                }
            }
        }
        Ok(false)
    }

    fn build_type(&mut self, file: &FileEntity, header: TypeHeader) -> ParserResult<TypeDecl> {
        let TypeHeader {
            kind,
            name,
            is_abstract,
            is_final,
            extends,
            implements,
        } = header;
        trace!("line {}: {:?} '{}'", self.line_number, kind, name);
        self.metrics.types_found += 1;

        let mut decl = match kind {
            TypeKind::Interface => {
                let mut interface = InterfaceEntity::new(name);
                interface.extends = extends;
                interface.is_final = is_final;
                interface.line = Some(self.line_number);
                interface.namespace = file.namespace.clone();
                TypeDecl::Interface(interface)
            }
            TypeKind::Class => {
                let mut class = ClassEntity::new(name);
                class.extends = extends;
                class.set_final(is_final)?;
                class.set_abstract(is_abstract)?;
                for interface in implements {
                    class.add_implemented_interface(interface);
                }
                class.line = Some(self.line_number);
                class.namespace = file.namespace.clone();
                TypeDecl::Class(class)
            }
            TypeKind::Trait => {
                let mut trait_entity = TraitEntity::new(name);
                trait_entity.line = Some(self.line_number);
                trait_entity.namespace = file.namespace.clone();
                TypeDecl::Trait(trait_entity)
            }
        };

        if let Some(block) = self.open_blocks.pop() {
            self.open_blocks.clear();
            match decl {
                TypeDecl::Class(ref mut class) => decorate_class(class, &block),
                TypeDecl::Interface(ref mut interface) => decorate_interface(interface, &block),
                TypeDecl::Trait(ref mut trait_entity) => decorate_trait(trait_entity, &block),
            }
        }

        // Types without their own classification inherit the file's.
        match decl {
            TypeDecl::Class(ref mut class) => {
                if class.category.is_none() {
                    class.category = file.category.clone();
                }
                if class.package.is_none() {
                    class.package = file.package.clone();
                }
            }
            TypeDecl::Interface(ref mut interface) => {
                if interface.category.is_none() {
                    interface.category = file.category.clone();
                }
                if interface.package.is_none() {
                    interface.package = file.package.clone();
                }
            }
            TypeDecl::Trait(ref mut trait_entity) => {
                if trait_entity.category.is_none() {
                    trait_entity.category = file.category.clone();
                }
                if trait_entity.package.is_none() {
                    trait_entity.package = file.package.clone();
                }
            }
        }
        Ok(decl)
    }

    fn build_function(&mut self, header: FunctionHeader) -> FunctionEntity {
        let mut function = FunctionEntity::new(header.name);
        function.line = Some(self.line_number);
        self.apply_signature(&mut function, &header.raw_params, header.return_hint);
        if let Some(block) = self.open_blocks.pop() {
            self.open_blocks.clear();
            decorate_function(&mut function, &block);
        }
        function
    }

    fn build_method(&mut self, header: FunctionHeader) -> MethodEntity {
        let mut method = MethodEntity::new(header.name.clone());
        method.function.line = Some(self.line_number);
        method.is_abstract = header.is_abstract;
        method.is_final = header.is_final;
        method.is_static = header.is_static;
        method.access = header.access;
        // Methods default to a void return until a signature hint or a
        // doc block says otherwise.
        let hint = header.return_hint.unwrap_or_else(|| "void".to_string());
        self.apply_signature(&mut method.function, &header.raw_params, Some(hint));
        if let Some(block) = self.open_blocks.pop() {
            self.open_blocks.clear();
            decorate_method(&mut method, &block);
        }
        method
    }

    /// Split the raw parameter list on commas and parse each fragment;
    /// fragments the parameter pattern does not model are skipped.
    fn apply_signature(
        &mut self,
        function: &mut FunctionEntity,
        raw_params: &str,
        return_hint: Option<String>,
    ) {
        if !raw_params.trim().is_empty() {
            for fragment in raw_params.split(',') {
                let Some(capture) = parse_parameter_fragment(fragment.trim()) else {
                    debug!(
                        "line {}: unparsed parameter fragment '{}' in '{}'",
                        self.line_number,
                        fragment.trim(),
                        function.name
                    );
                    continue;
                };
                let mut parameter = Parameter::new(capture.name);
                parameter.cast = capture.cast;
                parameter.by_reference = capture.by_reference;
                parameter.default_value = capture.default_value;
                parameter.line = Some(self.line_number);
                function.set_parameter(parameter);
            }
        }
        if let Some(hint) = return_hint {
            function.set_return(ReturnValue::new(hint));
        }
    }

    fn handle_member(&mut self, member_decl: MemberDecl) -> ParserResult<()> {
        let line = self.line_number;
        let Some(current) = self.current_type.as_mut() else {
            return Ok(());
        };
        let key = format!("{}::{}", current.name(), member_decl.name);

        let mut member = Member::new(member_decl.name);
        member.access = member_decl.access;
        member.is_static = member_decl.is_static;
        member.default_value = member_decl.default_value;
        member.line = Some(line);

        // Correlate with a pending `@var` annotation for this member.
        if let Some(doc) = self.var_blocks.get(&key) {
            if doc.name == member.name {
                member.merge(doc)?;
                member.line = Some(line);
            }
        }

        match current {
            TypeDecl::Class(class) => {
                self.metrics.members_found += 1;
                class.set_member(member);
            }
            TypeDecl::Trait(trait_entity) => {
                self.metrics.members_found += 1;
                trait_entity.set_member(member);
            }
            TypeDecl::Interface(interface) => {
                debug!(
                    "line {}: member '${}' on interface '{}', skipped",
                    line, member.name, interface.name
                );
            }
        }
        Ok(())
    }

    /// Attach a finished type to the file, first wiring captured bodies
    /// onto its methods.
    fn attach_type(&mut self, file: &mut FileEntity, decl: TypeDecl) {
        self.current_method = None;
        match decl {
            TypeDecl::Class(mut class) => {
                for method in &mut class.methods {
                    if let Some(body) = self.bodies.remove(method.name()) {
                        method.function.source_code = body;
                    }
                }
                file.add_class(class);
            }
            TypeDecl::Interface(mut interface) => {
                for method in &mut interface.methods {
                    if let Some(body) = self.bodies.remove(method.name()) {
                        method.function.source_code = body;
                    }
                }
                file.add_interface(interface);
            }
            TypeDecl::Trait(mut trait_entity) => {
                for method in &mut trait_entity.methods {
                    if let Some(body) = self.bodies.remove(method.name()) {
                        method.function.source_code = body;
                    }
                }
                file.add_trait(trait_entity);
            }
        }
        self.bodies.clear();
    }

    fn note_unrecognized(&mut self, line: &str) {
        if line.is_empty() || line == "{" || line == "}" {
            return;
        }
        self.metrics.lines_unrecognized += 1;
        debug!("line {}: unrecognized: {}", self.line_number, line);
    }
}

fn member_from_annotation(var: &VarAnnotation) -> Member {
    let mut member = Member::new(var.name.clone()).with_type(var.type_annotation.clone());
    if let Some(ref description) = var.description {
        member.description = Some(description.clone());
    }
    member
}

fn stripped_of(raw: &str) -> &str {
    strip_line_comment(raw).trim()
}
