// SPDX-License-Identifier: GPL-3.0-only

//! Well-known property keys
//!
//! Description keys are part of the client-facing protocol and must not be
//! renamed. Registry keys and class names are the names the device registry
//! publishes for block-storage media and devices.

/// Keys of a disk description
pub mod description {
    pub const DISK_ID: &str = "DADiskID";

    pub const VOLUME_KIND: &str = "DAVolumeKind";
    pub const VOLUME_MOUNTABLE: &str = "DAVolumeMountable";
    pub const VOLUME_NAME: &str = "DAVolumeName";
    pub const VOLUME_NETWORK: &str = "DAVolumeNetwork";
    pub const VOLUME_PATH: &str = "DAVolumePath";
    pub const VOLUME_UUID: &str = "DAVolumeUUID";

    pub const MEDIA_BLOCK_SIZE: &str = "DAMediaBlockSize";
    pub const MEDIA_BSD_MAJOR: &str = "DAMediaBSDMajor";
    pub const MEDIA_BSD_MINOR: &str = "DAMediaBSDMinor";
    pub const MEDIA_BSD_NAME: &str = "DAMediaBSDName";
    pub const MEDIA_BSD_UNIT: &str = "DAMediaBSDUnit";
    pub const MEDIA_CONTENT: &str = "DAMediaContent";
    pub const MEDIA_EJECTABLE: &str = "DAMediaEjectable";
    pub const MEDIA_ICON: &str = "DAMediaIcon";
    pub const MEDIA_KIND: &str = "DAMediaKind";
    pub const MEDIA_LEAF: &str = "DAMediaLeaf";
    pub const MEDIA_NAME: &str = "DAMediaName";
    pub const MEDIA_PATH: &str = "DAMediaPath";
    pub const MEDIA_REMOVABLE: &str = "DAMediaRemovable";
    pub const MEDIA_SIZE: &str = "DAMediaSize";
    pub const MEDIA_TYPE: &str = "DAMediaType";
    pub const MEDIA_UUID: &str = "DAMediaUUID";
    pub const MEDIA_WHOLE: &str = "DAMediaWhole";
    pub const MEDIA_WRITABLE: &str = "DAMediaWritable";

    pub const DEVICE_GUID: &str = "DADeviceGUID";
    pub const DEVICE_INTERNAL: &str = "DADeviceInternal";
    pub const DEVICE_MODEL: &str = "DADeviceModel";
    pub const DEVICE_PATH: &str = "DADevicePath";
    pub const DEVICE_PROTOCOL: &str = "DADeviceProtocol";
    pub const DEVICE_REVISION: &str = "DADeviceRevision";
    pub const DEVICE_UNIT: &str = "DADeviceUnit";
    pub const DEVICE_VENDOR: &str = "DADeviceVendor";

    pub const BUS_NAME: &str = "DABusName";
    pub const BUS_PATH: &str = "DABusPath";

    pub const APPEARANCE_TIME: &str = "DAAppearanceTime";
}

/// Keys published by the device registry
pub mod registry {
    pub const BSD_NAME: &str = "BSD Name";
    pub const BSD_MAJOR: &str = "BSD Major";
    pub const BSD_MINOR: &str = "BSD Minor";
    pub const BSD_UNIT: &str = "BSD Unit";

    pub const PREFERRED_BLOCK_SIZE: &str = "Preferred Block Size";
    pub const CONTENT: &str = "Content";
    pub const EJECTABLE: &str = "Ejectable";
    pub const ICON: &str = "IOMediaIcon";
    pub const LEAF: &str = "Leaf";
    pub const REMOVABLE: &str = "Removable";
    pub const SIZE: &str = "Size";
    pub const WHOLE: &str = "Whole";
    pub const WRITABLE: &str = "Writable";
    /// Optical media type, published by both CD and DVD media
    pub const MEDIA_TYPE: &str = "Type";

    pub const PROTOCOL_CHARACTERISTICS: &str = "Protocol Characteristics";
    pub const INTERCONNECT_LOCATION: &str = "Physical Interconnect Location";
    pub const INTERCONNECT_TYPE: &str = "Physical Interconnect";
    pub const LOCATION_INTERNAL: &str = "Internal";
    pub const LOCATION_EXTERNAL: &str = "External";

    pub const DEVICE_CHARACTERISTICS: &str = "Device Characteristics";
    pub const PRODUCT_NAME: &str = "Product Name";
    pub const PRODUCT_REVISION: &str = "Product Revision Level";
    pub const VENDOR_NAME: &str = "Vendor Name";

    pub const UNIT: &str = "IOUnit";
    pub const GUID: &str = "GUID";

    pub const AUTO_MOUNT: &str = "autodiskmount";
    pub const EJECT_UPON_LOGOUT: &str = "eject-upon-logout";
    pub const OWNER_UID: &str = "owner-uid";
    pub const OWNER_MODE: &str = "owner-mode";

    /// Criteria key answered by the live registry instead of the description
    pub const PROPERTY_MATCH: &str = "IOPropertyMatch";
}

/// Registry class names
pub mod class {
    pub const MEDIA: &str = "IOMedia";
    pub const CD_MEDIA: &str = "IOCDMedia";
    pub const DVD_MEDIA: &str = "IODVDMedia";
    pub const BLOCK_STORAGE_DEVICE: &str = "IOBlockStorageDevice";
}
