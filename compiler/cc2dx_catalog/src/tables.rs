//! Static vocabulary tables.
//!
//! Each table is sorted by key so the tests can check for accidental
//! duplicates with a single window pass.

/// Objective-C / Cocos2d identifier to Cocos2d-x 2.x identifier.
pub(crate) const OBJC_TO_CPP: &[(&str, &str)] = &[
    ("BOOL", "bool"),
    ("CGPoint", "CCPoint"),
    ("CGPointEqualToPoint", "CCPointEqualToPoint"),
    ("CGPointZero", "CCPointZero"),
    ("CGRect", "CCRect"),
    ("CGRectContainsPoint", "CCRectContainsPoint"),
    ("CGRectMake", "CCRectMake"),
    ("CGSize", "CCSize"),
    ("CGSizeMake", "CCSizeMake"),
    ("FALSE", "false"),
    ("NO", "false"),
    ("NSArray", "CCArray"),
    ("NSAssert", "CCAssert"),
    ("NSDictionary", "CCDictionary"),
    ("NSLog", "CCLog"),
    ("NSMutableArray", "CCArray"),
    ("NSMutableDictionary", "CCDictionary"),
    ("NSNumber", "CCInteger"),
    ("NSObject", "CCObject"),
    ("NSSet", "CCSet"),
    ("NSString", "CCString"),
    ("NSUserDefaults", "CCUserDefault"),
    ("NSValue", "CCValue"),
    ("NULL", "nullptr"),
    ("SEL", "@selector"),
    ("TRUE", "true"),
    ("UIEvent", "CCEvent"),
    ("UITouch", "CCTouch"),
    ("YES", "true"),
    ("id", "CCObject *"),
    ("nil", "nullptr"),
    ("self", "this"),
    ("super", "__SUPER_CLASS__"),
];

/// Cocos2d-x 2.x name to its 3.x replacement.
pub(crate) const V2_TO_V3: &[(&str, &str)] = &[
    ("CCArray", "Vector"),
    ("CCDictionary", "Map"),
    ("CCObject *", "Ref *"),
    ("CCPointZero", "Point::ZERO"),
];

/// 2.x names that still compile under 3.x but are deprecated there.
pub(crate) const DEPRECATED_V3: &[&str] = &[
    "CCPointEqualToPoint",
    "CCRectContainsPoint",
    "CCRectMake",
    "CCSizeMake",
    "CCString",
];

/// Engine macros. They look like engine types but live outside the namespace.
pub(crate) const CC_MACROS: &[&str] = &[
    "CCAssert",
    "CCLog",
    "CCPointEqualToPoint",
    "CCPointZero",
    "CCRectContainsPoint",
    "CCRectMake",
    "CCSizeMake",
    "ccc3",
    "ccp",
];

/// Class-side constructors that become the static `create` factory.
pub(crate) const CREATE_METHODS: &[&str] = &[
    "actionWithAction",
    "actionWithDuration",
    "actionWithTarget",
    "actions",
    "array",
    "arrayWithObjects",
    "labelWithString",
    "node",
    "numberWithInt",
    "spriteWithFile",
    "stringWithCString",
    "stringWithString",
];

/// Class-side methods renamed one-to-one.
pub(crate) const STATIC_METHODS: &[(&str, &str)] = &[
    ("spriteWithSpriteFrameName", "createWithSpriteFrameName"),
    ("standardUserDefaults", "sharedUserDefault"),
    ("stringWithContentsOfFile", "createWithContentsOfFile"),
    ("stringWithFormat", "createWithFormat"),
    ("valueWithCGPoint", "<CCPoint>valueWithValue"),
];

/// Framework headers with no Cocos2d-x equivalent.
pub(crate) const IGNORED_HEADERS: &[&str] = &["Foundation/Foundation.h"];
