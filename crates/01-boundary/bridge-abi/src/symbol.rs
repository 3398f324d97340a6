//! Boundary symbol naming.
//!
//! Every exported function is named `__bridge__$<Owner>$<op>`, where the owner
//! is either an opaque type (`RustString`) or a vector of an element type
//! (`Vec_RustString`, `Vec_u32`). The renderers below produce the C
//! declarations a header for that ABI contains.

use std::fmt::{self, Write as _};

use crate::{AbiError, AbiResult};

pub const SYMBOL_PREFIX: &str = "__bridge__";

/// One operation of the per-element vector ABI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VecOp {
    New,
    Drop,
    Push,
    Pop,
    Get,
    GetMut,
    AsPtr,
    Len,
}

impl VecOp {
    pub const ALL: [VecOp; 8] = [
        VecOp::New,
        VecOp::Drop,
        VecOp::Push,
        VecOp::Pop,
        VecOp::Get,
        VecOp::GetMut,
        VecOp::Len,
        VecOp::AsPtr,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VecOp::New => "new",
            VecOp::Drop => "drop",
            VecOp::Push => "push",
            VecOp::Pop => "pop",
            VecOp::Get => "get",
            VecOp::GetMut => "get_mut",
            VecOp::AsPtr => "as_ptr",
            VecOp::Len => "len",
        }
    }
}

/// Primitive element types bridged by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    U8,
    U16,
    U32,
    U64,
    Usize,
    I8,
    I16,
    I32,
    I64,
    Isize,
    F32,
    F64,
    Bool,
}

impl Primitive {
    pub const ALL: [Primitive; 13] = [
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::Usize,
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::Isize,
        Primitive::F32,
        Primitive::F64,
        Primitive::Bool,
    ];

    /// Rust spelling, also used inside symbol names (`Vec_u8`).
    pub fn rust_name(self) -> &'static str {
        match self {
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::Usize => "usize",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::Isize => "isize",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
        }
    }

    pub fn c_type(self) -> &'static str {
        match self {
            Primitive::U8 => "uint8_t",
            Primitive::U16 => "uint16_t",
            Primitive::U32 => "uint32_t",
            Primitive::U64 => "uint64_t",
            Primitive::Usize => "uintptr_t",
            Primitive::I8 => "int8_t",
            Primitive::I16 => "int16_t",
            Primitive::I32 => "int32_t",
            Primitive::I64 => "int64_t",
            Primitive::Isize => "intptr_t",
            Primitive::F32 => "float",
            Primitive::F64 => "double",
            Primitive::Bool => "bool",
        }
    }

    pub fn from_name(name: &str) -> AbiResult<Self> {
        Self::ALL
            .into_iter()
            .find(|prim| prim.rust_name() == name)
            .ok_or_else(|| AbiError::UnknownPrimitive(name.to_string()))
    }

    /// C name of the by-value optional returned by `pop`/`get`.
    pub fn c_option_type(self) -> String {
        format!("{SYMBOL_PREFIX}$Option${}", self.rust_name())
    }
}

/// Fully qualified name of one exported boundary function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundarySymbol {
    owner: String,
    op: String,
}

impl BoundarySymbol {
    /// Function operating on an opaque type, e.g. `RustString$len`.
    pub fn method(ty_name: &str, op: &str) -> Self {
        Self {
            owner: ty_name.to_string(),
            op: op.to_string(),
        }
    }

    /// Vector ABI function for an element type, e.g. `Vec_RustString$push`.
    pub fn vec(elem_name: &str, op: VecOp) -> Self {
        Self {
            owner: format!("Vec_{elem_name}"),
            op: op.as_str().to_string(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn link_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BoundarySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SYMBOL_PREFIX}${}${}", self.owner, self.op)
    }
}

/// How elements of a vector cross the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ElementAbi {
    /// Heap-resident element passed as a handle; null means absent.
    Opaque,
    /// Element passed by value; absence uses the tagged optional.
    ByValue(Primitive),
}

fn c_signature(op: VecOp, elem: ElementAbi) -> (String, String) {
    let vec = "void* vec_ptr";
    let (ret, params) = match (op, elem) {
        (VecOp::New, _) => ("void*".to_string(), "void".to_string()),
        (VecOp::Drop, _) => ("void".to_string(), vec.to_string()),
        (VecOp::Len, _) => ("uintptr_t".to_string(), vec.to_string()),
        (VecOp::Push, ElementAbi::Opaque) => ("void".to_string(), format!("{vec}, void* item_ptr")),
        (VecOp::Push, ElementAbi::ByValue(prim)) => {
            ("void".to_string(), format!("{vec}, {} item", prim.c_type()))
        }
        (VecOp::Pop, ElementAbi::Opaque) => ("void*".to_string(), vec.to_string()),
        (VecOp::Pop, ElementAbi::ByValue(prim)) => (prim.c_option_type(), vec.to_string()),
        (VecOp::Get | VecOp::GetMut, ElementAbi::Opaque) => {
            ("void*".to_string(), format!("{vec}, uintptr_t index"))
        }
        (VecOp::Get | VecOp::GetMut, ElementAbi::ByValue(prim)) => {
            (prim.c_option_type(), format!("{vec}, uintptr_t index"))
        }
        (VecOp::AsPtr, ElementAbi::Opaque) => ("void*".to_string(), vec.to_string()),
        (VecOp::AsPtr, ElementAbi::ByValue(prim)) => {
            (format!("const {}*", prim.c_type()), vec.to_string())
        }
    };
    (ret, params)
}

fn render_vec_declarations(elem_name: &str, elem: ElementAbi) -> String {
    let mut out = String::new();
    for op in VecOp::ALL {
        let (ret, params) = c_signature(op, elem);
        let symbol = BoundarySymbol::vec(elem_name, op);
        writeln!(out, "{ret} {symbol}({params});").expect("write declaration");
    }
    out
}

/// C declarations of the vector ABI for an opaque element type.
pub fn c_declarations_for_opaque_vec(ty_name: &str) -> String {
    let mut out = format!("typedef struct {ty_name} {ty_name};\n");
    writeln!(
        out,
        "void {}(void* self);",
        BoundarySymbol::method(ty_name, "_free")
    )
    .expect("write free declaration");
    out.push_str(&render_vec_declarations(ty_name, ElementAbi::Opaque));
    out
}

/// C declarations of the vector ABI for a primitive element type, including
/// its optional typedef.
pub fn c_declarations_for_primitive_vec(prim: Primitive) -> String {
    let option = prim.c_option_type();
    let mut out = format!(
        "typedef struct {option} {{ bool is_some; {} val; }} {option};\n",
        prim.c_type()
    );
    out.push_str(&render_vec_declarations(
        prim.rust_name(),
        ElementAbi::ByValue(prim),
    ));
    out
}
