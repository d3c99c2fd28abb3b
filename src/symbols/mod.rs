//! Access to program declarations (external symbol index) and class member metadata.

use crate::value::DisplayCategory;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::PathBuf;
use strum_macros::{Display, EnumIter};

pub mod resolve;

/// Place in a source file.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SourcePosition {
    pub file: PathBuf,
    pub offset: usize,
}

impl SourcePosition {
    pub fn new(file: impl Into<PathBuf>, offset: usize) -> Self {
        Self {
            file: file.into(),
            offset,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MemberKind {
    Field,
    /// Accessor exposed property.
    Getter,
}

#[derive(Clone, PartialEq, Debug)]
pub struct MemberDecl {
    pub kind: MemberKind,
    pub is_static: bool,
    pub position: Option<SourcePosition>,
}

/// Class declaration as known by the symbol index.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ClassDecl {
    pub qualified_name: String,
    /// Declared members in declaration order.
    pub members: IndexMap<String, MemberDecl>,
    /// Qualified names of direct supertypes.
    pub supers: Vec<String>,
    /// Instances of the class may get members at runtime.
    pub dynamic: bool,
}

impl ClassDecl {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            ..Default::default()
        }
    }

    pub fn with_member(
        mut self,
        name: impl Into<String>,
        kind: MemberKind,
        is_static: bool,
        position: Option<SourcePosition>,
    ) -> Self {
        self.members.insert(
            name.into(),
            MemberDecl {
                kind,
                is_static,
                position,
            },
        );
        self
    }

    pub fn with_super(mut self, qualified_name: impl Into<String>) -> Self {
        self.supers.push(qualified_name.into());
        self
    }

    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Field or getter declared in this class (supertypes are not considered).
    pub fn member(&self, name: &str) -> Option<&MemberDecl> {
        self.members.get(name)
    }
}

/// Declarations lookup (external collaborator).
pub trait SymbolIndex: Send + Sync {
    /// Find class by qualified name (`pkg.sub.Name`) visible from `at`.
    fn find_class(&self, qualified_name: &str, at: Option<&SourcePosition>) -> Option<ClassDecl>;

    /// Declaration of a local variable `name` of a function enclosing `at`.
    fn local_variable(&self, name: &str, at: &SourcePosition) -> Option<SourcePosition>;

    /// Declaration of a parameter `name` of a function enclosing `at`.
    fn parameter(&self, name: &str, at: &SourcePosition) -> Option<SourcePosition>;
}

/// Member category of a class, in the classification priority order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MemberBucket {
    OwnStaticField,
    OwnStaticProperty,
    OwnField,
    OwnProperty,
    InheritedStaticField,
    InheritedStaticProperty,
    InheritedField,
    InheritedProperty,
}

impl MemberBucket {
    fn from_decl(decl: &MemberDecl, inherited: bool) -> Self {
        use MemberBucket::*;
        match (inherited, decl.is_static, decl.kind) {
            (false, true, MemberKind::Field) => OwnStaticField,
            (false, true, MemberKind::Getter) => OwnStaticProperty,
            (false, false, MemberKind::Field) => OwnField,
            (false, false, MemberKind::Getter) => OwnProperty,
            (true, true, MemberKind::Field) => InheritedStaticField,
            (true, true, MemberKind::Getter) => InheritedStaticProperty,
            (true, false, MemberKind::Field) => InheritedField,
            (true, false, MemberKind::Getter) => InheritedProperty,
        }
    }

    pub fn is_inherited(self) -> bool {
        use MemberBucket::*;
        matches!(
            self,
            InheritedStaticField | InheritedStaticProperty | InheritedField | InheritedProperty
        )
    }

    /// Display category for members of this bucket.
    pub fn category(self) -> DisplayCategory {
        use MemberBucket::*;
        match self {
            OwnStaticField | InheritedStaticField => DisplayCategory::StaticField,
            OwnStaticProperty | InheritedStaticProperty => DisplayCategory::StaticProperty,
            OwnField | InheritedField => DisplayCategory::Field,
            OwnProperty | InheritedProperty => DisplayCategory::Property,
        }
    }
}

/// Member names of a class split by [`MemberBucket`].
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ClassMetadata {
    buckets: IndexMap<String, (MemberBucket, DisplayCategory)>,
    dynamic: bool,
}

impl ClassMetadata {
    pub fn new(dynamic: bool) -> Self {
        Self {
            buckets: IndexMap::new(),
            dynamic,
        }
    }

    /// Add a member into bucket. If the name is already known, the first bucket by
    /// priority order wins.
    pub fn with_member(
        mut self,
        name: impl Into<String>,
        bucket: MemberBucket,
        category: DisplayCategory,
    ) -> Self {
        self.insert(name, bucket, category);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bucket: MemberBucket, category: DisplayCategory) {
        let entry = self.buckets.entry(name.into()).or_insert((bucket, category));
        if (bucket as u8) < (entry.0 as u8) {
            *entry = (bucket, category);
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Bucket and display category of a member.
    pub fn classify(&self, name: &str) -> Option<(MemberBucket, DisplayCategory)> {
        self.buckets.get(name).copied()
    }

    /// Collect member metadata of a class and all of its supertypes.
    ///
    /// Members declared in the class itself are own members, the rest are inherited.
    /// Supertypes are visited depth-first, each at most once.
    pub fn collect(class: &ClassDecl, index: &dyn SymbolIndex, at: Option<&SourcePosition>) -> Self {
        let mut metadata = ClassMetadata::new(class.dynamic);
        for (name, decl) in &class.members {
            let bucket = MemberBucket::from_decl(decl, false);
            metadata.insert(name.clone(), bucket, bucket.category());
        }

        let mut visited = HashSet::from([class.qualified_name.clone()]);
        let mut queue: Vec<String> = class.supers.iter().rev().cloned().collect();
        while let Some(super_name) = queue.pop() {
            if !visited.insert(super_name.clone()) {
                continue;
            }
            let Some(super_class) = index.find_class(&super_name, at) else {
                continue;
            };
            for (name, decl) in &super_class.members {
                let bucket = MemberBucket::from_decl(decl, true);
                metadata.insert(name.clone(), bucket, bucket.category());
            }
            queue.extend(super_class.supers.iter().rev().cloned());
        }

        metadata
    }
}
