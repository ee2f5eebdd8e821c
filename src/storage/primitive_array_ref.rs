use arrow::{array::{
    Array, ArrayRef, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array, Int8Array,
    UInt16Array, UInt32Array, UInt64Array, UInt8Array,
}, datatypes::DataType};

/// Borrowed view over any Arrow array whose values widen to `f64`.
pub enum PrimitiveArrayRef<'a> {
    Float64(&'a Float64Array),
    Float32(&'a Float32Array),
    Int64(&'a Int64Array),
    Int32(&'a Int32Array),
    Int16(&'a Int16Array),
    Int8(&'a Int8Array),
    UInt64(&'a UInt64Array),
    UInt32(&'a UInt32Array),
    UInt16(&'a UInt16Array),
    UInt8(&'a UInt8Array),
}

impl<'a> PrimitiveArrayRef<'a> {
    fn inner(&self) -> &dyn Array {
        match self {
            PrimitiveArrayRef::Float64(arr) => *arr,
            PrimitiveArrayRef::Float32(arr) => *arr,
            PrimitiveArrayRef::Int64(arr) => *arr,
            PrimitiveArrayRef::Int32(arr) => *arr,
            PrimitiveArrayRef::Int16(arr) => *arr,
            PrimitiveArrayRef::Int8(arr) => *arr,
            PrimitiveArrayRef::UInt64(arr) => *arr,
            PrimitiveArrayRef::UInt32(arr) => *arr,
            PrimitiveArrayRef::UInt16(arr) => *arr,
            PrimitiveArrayRef::UInt8(arr) => *arr,
        }
    }

    pub fn len(&self) -> usize {
        self.inner().len()
    }

    /// Value at `i` widened to `f64`; nulls and NaN both read as missing.
    pub fn value(&self, i: usize) -> Option<f64> {
        if self.inner().is_null(i) {
            return None;
        }
        let v = match self {
            PrimitiveArrayRef::Float64(arr) => arr.value(i),
            PrimitiveArrayRef::Float32(arr) => arr.value(i) as f64,
            PrimitiveArrayRef::Int64(arr) => arr.value(i) as f64,
            PrimitiveArrayRef::Int32(arr) => arr.value(i) as f64,
            PrimitiveArrayRef::Int16(arr) => arr.value(i) as f64,
            PrimitiveArrayRef::Int8(arr) => arr.value(i) as f64,
            PrimitiveArrayRef::UInt64(arr) => arr.value(i) as f64,
            PrimitiveArrayRef::UInt32(arr) => arr.value(i) as f64,
            PrimitiveArrayRef::UInt16(arr) => arr.value(i) as f64,
            PrimitiveArrayRef::UInt8(arr) => arr.value(i) as f64,
        };
        (!v.is_nan()).then_some(v)
    }

    pub fn to_values(&self) -> Vec<Option<f64>> {
        (0..self.len()).map(|i| self.value(i)).collect()
    }
}

/// Returns `None` for any non-numeric array.
pub fn downcast_arr(array_ref: &ArrayRef) -> Option<PrimitiveArrayRef<'_>> {
    let any = array_ref.as_any();
    match array_ref.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(PrimitiveArrayRef::Float64),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(PrimitiveArrayRef::Float32),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(PrimitiveArrayRef::Int64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(PrimitiveArrayRef::Int32),
        DataType::Int16 => any.downcast_ref::<Int16Array>().map(PrimitiveArrayRef::Int16),
        DataType::Int8 => any.downcast_ref::<Int8Array>().map(PrimitiveArrayRef::Int8),
        DataType::UInt64 => any.downcast_ref::<UInt64Array>().map(PrimitiveArrayRef::UInt64),
        DataType::UInt32 => any.downcast_ref::<UInt32Array>().map(PrimitiveArrayRef::UInt32),
        DataType::UInt16 => any.downcast_ref::<UInt16Array>().map(PrimitiveArrayRef::UInt16),
        DataType::UInt8 => any.downcast_ref::<UInt8Array>().map(PrimitiveArrayRef::UInt8),
        _ => None,
    }
}
